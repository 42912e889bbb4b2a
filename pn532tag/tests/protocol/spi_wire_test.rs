use pn532tag::{Channel, ChannelStatus, Error, MockTransport, SpiChannel};

#[test]
fn wait_for_ack_times_out_when_never_ready() {
    let mut bus = MockTransport::new();
    bus.silent = true;
    let mut ch = SpiChannel::new(bus).with_ack_timeout(50);
    assert_eq!(ch.wait_for_ack(50).unwrap(), ChannelStatus::Timeout);
    assert!(!ch.bus().selected);
}

#[test]
fn command_and_response_over_the_wire() -> anyhow::Result<()> {
    let mut bus = MockTransport::new();
    bus.push_response(0x4A, &[0x01, 0x01, 0x00, 0x04, 0x08, 0x04, 1, 2, 3, 4])?;
    let mut ch = SpiChannel::new(bus);

    assert_eq!(ch.write_command(&[0x4A, 0x01], &[0x00])?, ChannelStatus::Ok);
    let mut buf = [0u8; 20];
    let n = ch.read_response(&mut buf, 1000)?;
    assert_eq!(&buf[..n], &[0x01, 0x01, 0x00, 0x04, 0x08, 0x04, 1, 2, 3, 4]);

    let frames = ch.bus().written_frames()?;
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].command, 0x4A);
    assert_eq!(frames[0].payload, vec![0x01, 0x00]);
    Ok(())
}

#[test]
fn read_without_pending_response_times_out() {
    let mut ch = SpiChannel::new(MockTransport::new());
    let mut buf = [0u8; 8];
    assert!(matches!(ch.read_response(&mut buf, 30), Err(Error::LinkTimeout)));
}
