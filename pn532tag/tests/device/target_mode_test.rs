#[path = "../common/mod.rs"]
mod common;

use pn532tag::{Error, TargetProfile};

#[test]
fn target_mode_round_trip_over_spi() -> anyhow::Result<()> {
    let select = common::fixtures::select_cc();
    let mut chip = common::helpers::spi_chip_with_responses(&[
        (0x8C, vec![0x08, 0xE0, 0x80]),
        (0x86, common::helpers::initiator_data(&select)),
        (0x8E, vec![0x00]),
    ])?;

    chip.init_as_target(TargetProfile::PiccFelica, 0)?;
    assert_eq!(chip.get_initiator_data()?, select);
    chip.set_responder_data(&[0x90, 0x00], &[])?;

    let frames = chip.channel().bus().written_frames()?;
    assert_eq!(frames[0].payload, TargetProfile::PiccFelica.params());
    assert_eq!(frames[1].command, 0x86);
    assert!(frames[1].payload.is_empty());
    assert_eq!(frames[2].command, 0x8E);
    assert_eq!(frames[2].payload, vec![0x90, 0x00]);
    Ok(())
}

#[test]
fn released_target_reports_no_reader() -> anyhow::Result<()> {
    let mut chip = common::helpers::spi_chip_with_responses(&[(0x86, vec![0x29])])?;
    assert!(matches!(chip.get_initiator_data(), Err(Error::NoReaderPresent)));
    Ok(())
}

#[test]
fn response_larger_than_packet_buffer() -> anyhow::Result<()> {
    let mut chip = common::helpers::spi_chip_with_responses(&[(0x86, vec![0x00; 48])])?;
    match chip.get_initiator_data() {
        Err(Error::BufferTooSmall { capacity, actual }) => {
            assert_eq!(capacity, 40);
            assert_eq!(actual, 48);
        }
        other => panic!("expected BufferTooSmall, got: {:?}", other),
    }
    Ok(())
}
