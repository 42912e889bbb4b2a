// Integration tests for the async emulation service. Only built with the
// default `async` feature.
#![cfg(feature = "async")]

#[path = "common/mod.rs"]
mod common;

use std::sync::Arc;
use std::time::Duration;

use common::fixtures::{read_binary, select_cc, select_ndef, select_ndef_application};
use pn532tag::ndef::NdefMessage;
use pn532tag::{EmulatorConfig, Error, SessionEnd, TagEmulator, TokenHolder};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn config() -> EmulatorConfig {
    EmulatorConfig::default()
        .with_settle_delay(0)
        .with_retry_interval(1)
}

#[tokio::test]
async fn phone_reads_token_uri() -> anyhow::Result<()> {
    init_logger();
    let holder = TokenHolder::with_token(common::fixtures::sample_token());
    let file = config().ndef_file(&common::fixtures::sample_token())?;
    let nlen = (file.len() - 2) as u8;

    let channel = common::helpers::scripted_reader(&[
        select_ndef_application(),
        select_cc(),
        read_binary(0, 15),
        select_ndef(),
        read_binary(0, 2),
        read_binary(2, nlen),
    ]);
    let emulator = TagEmulator::with_channel(channel, config());

    let end = emulator.run_session(&holder).await?;
    // script exhausted: the next TgGetData times out
    assert!(matches!(end, SessionEnd::Disconnected(Error::LinkTimeout)));

    let sent = emulator
        .with_chip(|chip| Ok(common::helpers::sent_responses(chip.channel())))
        .await?;
    assert_eq!(sent.len(), 6);
    assert_eq!(sent[2].len(), 17);

    let body = &sent[5];
    assert_eq!(&body[body.len() - 2..], &[0x90, 0x00]);
    let message = NdefMessage::parse(&body[..body.len() - 2])?;
    assert_eq!(
        message.records()[0].uri().as_deref(),
        Some(common::fixtures::sample_uri())
    );
    Ok(())
}

#[tokio::test]
async fn token_rotation_is_seen_by_the_next_read() -> anyhow::Result<()> {
    init_logger();
    let holder = Arc::new(TokenHolder::with_token("old".into()));
    holder.update("new".into());

    let channel = common::helpers::scripted_reader(&[select_ndef(), read_binary(2, 40)]);
    let emulator = TagEmulator::with_channel(channel, config());
    emulator.run_session(&holder).await?;

    let sent = emulator
        .with_chip(|chip| Ok(common::helpers::sent_responses(chip.channel())))
        .await?;
    let body = &sent[1];
    let message = NdefMessage::parse(&body[..body.len() - 2])?;
    assert_eq!(
        message.records()[0].uri().as_deref(),
        Some("https://ecotrip.meblabs.dev/new")
    );
    Ok(())
}

#[tokio::test]
async fn disabled_token_ends_session() -> anyhow::Result<()> {
    let holder = TokenHolder::with_token(common::fixtures::sample_token());
    holder.disable();

    let channel = common::helpers::scripted_reader(&[select_ndef(), read_binary(0, 2)]);
    let emulator = TagEmulator::with_channel(channel, config());
    let end = emulator.run_session(&holder).await?;
    assert!(matches!(end, SessionEnd::TokenUnavailable));
    Ok(())
}

#[tokio::test]
async fn service_loop_stops_on_cancel() -> anyhow::Result<()> {
    init_logger();
    let emulator = Arc::new(TagEmulator::with_channel(pn532tag::MockChannel::new(), config()));
    let holder = Arc::new(TokenHolder::new());

    let runner = Arc::clone(&emulator);
    let tokens = Arc::clone(&holder);
    let task = tokio::spawn(async move { runner.run_forever(&tokens).await });

    tokio::time::sleep(Duration::from_millis(20)).await;
    emulator.cancel();
    tokio::time::timeout(Duration::from_secs(5), task).await???;

    // nothing but target-init attempts: no reader ever showed up
    let commands = emulator.with_chip(|chip| Ok(chip.channel().commands())).await?;
    assert!(!commands.is_empty());
    assert!(commands.iter().all(|c| c[0] == 0x8C));
    Ok(())
}
