#[path = "../common/mod.rs"]
mod common;

use pn532tag::constants::PN532_MIFARE_ISO14443A;

#[test]
fn firmware_version_through_simulated_chip() -> anyhow::Result<()> {
    let mut chip =
        common::helpers::spi_chip_with_responses(&[(0x02, common::fixtures::firmware_payload())])?;
    let version = chip.get_firmware_version()?;
    assert_eq!(version.ic(), 0x32);
    assert_eq!(version.version(), 0x01);
    assert_eq!(version.revision(), 0x06);
    Ok(())
}

#[test]
fn sam_configuration_then_passive_target() -> anyhow::Result<()> {
    let mut chip = common::helpers::spi_chip_with_responses(&[
        (0x14, vec![]),
        (0x4A, vec![0x01, 0x01, 0x00, 0x44, 0x00, 0x07, 1, 2, 3, 4, 5, 6, 7]),
    ])?;
    chip.sam_configuration()?;
    let uid = chip.list_passive_target(PN532_MIFARE_ISO14443A)?;
    assert_eq!(uid.to_hex(), "01020304050607");

    let frames = chip.channel().bus().written_frames()?;
    assert_eq!(frames[0].command, 0x14);
    assert_eq!(frames[0].payload, vec![0x01, 0x14, 0x01]);
    assert_eq!(frames[1].command, 0x4A);
    Ok(())
}

#[test]
fn missing_chip_is_a_link_error() {
    let mut bus = pn532tag::MockTransport::new();
    bus.silent = true;
    let channel = pn532tag::SpiChannel::new(bus).with_ack_timeout(20);
    let mut chip = pn532tag::Pn532::new(channel);
    let err = chip.get_firmware_version().unwrap_err();
    assert!(matches!(err, pn532tag::Error::LinkTimeout));
    assert!(err.is_link_error());
}
