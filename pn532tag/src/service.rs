// pn532tag/src/service.rs

//! Async tag emulation service
//!
//! Bus traffic is blocking, so every chip call runs on tokio's blocking
//! pool while the caller's task is suspended. The chip sits behind a mutex
//! and at most one emulation session runs at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::time::MissedTickBehavior;

use crate::apdu::Type4Tag;
use crate::channel::Channel;
use crate::config::EmulatorConfig;
use crate::device::{Pn532, TargetProfile};
use crate::token::TokenSource;
use crate::types::FirmwareVersion;
use crate::{Error, Result};

/// How an emulation session ended.
#[derive(Debug)]
pub enum SessionEnd {
    /// The reader went away or the link broke
    Disconnected(Error),
    /// The reader asked for the NDEF file but no token was available, or
    /// the file built from it was too large
    TokenUnavailable,
    /// [`TagEmulator::cancel`] was observed between two APDUs
    Cancelled,
}

/// Emulates a Type 4 tag on a PN532 and serves the current token.
pub struct TagEmulator<C> {
    chip: Arc<Mutex<Pn532<C>>>,
    session: tokio::sync::Mutex<()>,
    cancelled: AtomicBool,
    config: EmulatorConfig,
}

impl<C> TagEmulator<C>
where
    C: Channel + Send + 'static,
{
    /// Service around an already configured driver.
    pub fn new(chip: Pn532<C>, config: EmulatorConfig) -> Self {
        Self {
            chip: Arc::new(Mutex::new(chip)),
            session: tokio::sync::Mutex::new(()),
            cancelled: AtomicBool::new(false),
            config,
        }
    }

    /// Build the driver from `channel` with the settings in `config`.
    pub fn with_channel(channel: C, config: EmulatorConfig) -> Self {
        let chip = config.controller(channel);
        Self::new(chip, config)
    }

    /// Settings in use
    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    /// Run `f` against the chip on the blocking pool.
    pub async fn with_chip<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut Pn532<C>) -> Result<R> + Send + 'static,
    {
        let chip = Arc::clone(&self.chip);
        tokio::task::spawn_blocking(move || {
            let mut chip = chip
                .lock()
                .map_err(|_| Error::Bus("chip mutex poisoned".to_string()))?;
            f(&mut chip)
        })
        .await
        .map_err(|e| Error::Task(e.to_string()))?
    }

    /// Wake the chip, let it settle and read its firmware version. `None` when no
    /// chip answered.
    pub async fn begin(&self) -> Result<Option<FirmwareVersion>> {
        self.with_chip(|chip| chip.begin()).await?;
        tokio::time::sleep(Duration::from_millis(self.config.settle_delay_ms)).await;

        match self.with_chip(|chip| chip.get_firmware_version()).await {
            Ok(version) => {
                info!(
                    "found chip PN5{:x}, firmware {}.{}",
                    version.ic(),
                    version.version(),
                    version.revision()
                );
                Ok(Some(version))
            }
            Err(e) if e.is_link_error() => {
                info!("no PN53x board found: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Request cancellation. A running session stops before its next APDU
    /// and the service loop returns.
    pub fn cancel(&self) {
        info!("cancellation requested");
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether `cancel` is in effect
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Clear a previous [`cancel`](Self::cancel).
    pub fn resume(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }

    /// Put the chip in target mode and wait until a reader activates it.
    /// Link failures are retried after the configured interval.
    pub async fn wait_for_reader(&self) -> Result<()> {
        let timeout_ms = self.config.target_init_timeout_ms;
        loop {
            if self.is_cancelled() {
                return Err(Error::Cancelled);
            }
            match self
                .with_chip(move |chip| chip.init_as_target(TargetProfile::PiccFelica, timeout_ms))
                .await
            {
                Ok(()) => {
                    info!("reader activated the tag");
                    return Ok(());
                }
                Err(e) if e.is_link_error() => {
                    debug!("target init failed, retrying: {}", e);
                    tokio::time::sleep(Duration::from_millis(self.config.retry_interval_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Answer the reader's APDUs until it goes away. The NDEF file is built
    /// from `tokens` whenever the reader reads it.
    pub async fn run_session<S>(&self, tokens: &S) -> Result<SessionEnd>
    where
        S: TokenSource + ?Sized,
    {
        let _session = self.session.lock().await;
        let mut tag = Type4Tag::new(self.config.max_ndef_len);
        tag.reset();
        info!("emulation session started");

        loop {
            if self.is_cancelled() {
                info!("emulation session cancelled");
                return Ok(SessionEnd::Cancelled);
            }

            let command = match self.with_chip(|chip| chip.get_initiator_data()).await {
                Ok(command) => command,
                Err(e) if e.is_link_error() => {
                    info!("reader disconnected: {}", e);
                    return Ok(SessionEnd::Disconnected(e));
                }
                Err(e) => return Err(e),
            };

            let response = tag.dispatch(&command, || self.ndef_file(tokens)).to_bytes();

            match self
                .with_chip(move |chip| chip.set_responder_data(&response, &[]))
                .await
            {
                Ok(()) => {}
                Err(e) if e.is_link_error() => {
                    info!("reader disconnected while answering: {}", e);
                    return Ok(SessionEnd::Disconnected(e));
                }
                Err(e) => return Err(e),
            }

            if tag.ndef_unavailable() {
                warn!("reader asked for the NDEF file but there is none to serve");
                return Ok(SessionEnd::TokenUnavailable);
            }
        }
    }

    fn ndef_file<S>(&self, tokens: &S) -> Option<Vec<u8>>
    where
        S: TokenSource + ?Sized,
    {
        let token = tokens.current_token()?;
        match self.config.ndef_file(&token) {
            Ok(file) => Some(file),
            Err(e) => {
                warn!("cannot build NDEF file: {}", e);
                None
            }
        }
    }

    /// Release the target so the chip can be re-initialised.
    pub async fn reset_chip(&self) -> Result<usize> {
        self.with_chip(|chip| chip.release(0)).await
    }

    /// One `wait_for_reader -> run_session -> reset_chip` round. Without an
    /// active token the session is skipped and the reader released.
    async fn cycle<S>(&self, tokens: &S) -> Result<()>
    where
        S: TokenSource + ?Sized,
    {
        self.wait_for_reader().await?;

        let session = if tokens.current_token().is_some() {
            self.run_session(tokens).await
        } else {
            info!("no active token, releasing reader");
            Ok(SessionEnd::TokenUnavailable)
        };
        let reset = self.reset_chip().await;

        let end = session?;
        debug!("session ended: {:?}", end);
        reset?;
        match end {
            SessionEnd::Cancelled => Err(Error::Cancelled),
            _ => Ok(()),
        }
    }

    /// Keep the tag emulating until cancelled. Link failures, oversized
    /// responses and missing tokens are logged and the loop starts over;
    /// bus and worker failures are returned.
    pub async fn run_forever<S>(&self, tokens: &S) -> Result<()>
    where
        S: TokenSource + ?Sized,
    {
        let period = Duration::from_millis(self.config.retry_interval_ms.max(1));
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match self.cycle(tokens).await {
                Ok(()) => {}
                Err(Error::Cancelled) => {
                    info!("tag emulation stopped");
                    return Ok(());
                }
                Err(e) if recoverable(&e) => warn!("tag emulation round failed: {}", e),
                Err(e) => {
                    error!("tag emulation aborted: {}", e);
                    return Err(e);
                }
            }
        }
    }
}

fn recoverable(e: &Error) -> bool {
    e.is_link_error()
        || matches!(
            e,
            Error::BufferTooSmall { .. } | Error::TokenUnavailable | Error::MalformedNdef(_)
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::MockChannel;
    use crate::token::{Token, TokenHolder};
    use crate::types::ChannelStatus;

    fn emulator(channel: MockChannel) -> TagEmulator<MockChannel> {
        let config = EmulatorConfig::default()
            .with_settle_delay(0)
            .with_retry_interval(1);
        TagEmulator::with_channel(channel, config)
    }

    fn initiator(apdu: &[u8]) -> Vec<u8> {
        let mut v = vec![0x00];
        v.extend_from_slice(apdu);
        v
    }

    /// Response APDUs handed to TgSetData, in order.
    fn responses(commands: &[Vec<u8>]) -> Vec<Vec<u8>> {
        commands
            .iter()
            .filter(|c| c[0] == 0x8E)
            .map(|c| c[1..].to_vec())
            .collect()
    }

    #[tokio::test]
    async fn begin_reports_firmware() {
        let mut ch = MockChannel::new();
        ch.push_response(vec![0x32, 0x01, 0x06, 0x07]);
        let emu = emulator(ch);
        let version = emu.begin().await.unwrap().unwrap();
        assert_eq!(version.ic(), 0x32);
        let begun = emu.with_chip(|c| Ok(c.channel().begun)).await.unwrap();
        assert!(begun);
    }

    #[tokio::test]
    async fn begin_without_chip() {
        let emu = emulator(MockChannel::new());
        assert!(emu.begin().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn wait_for_reader_retries_until_activated() {
        let mut ch = MockChannel::new();
        ch.push_status(ChannelStatus::Timeout);
        ch.push_status(ChannelStatus::InvalidAck);
        ch.push_response(vec![0x08, 0xE0, 0x80]);
        let emu = emulator(ch);
        emu.wait_for_reader().await.unwrap();
        let writes = emu.with_chip(|c| Ok(c.channel().commands())).await.unwrap();
        assert_eq!(writes.len(), 3);
        assert!(writes.iter().all(|w| w[0] == 0x8C));
    }

    #[tokio::test]
    async fn session_serves_ndef_file() {
        let token = Token::from("abc123");
        let file = EmulatorConfig::default().ndef_file(&token).unwrap();

        let mut ch = MockChannel::new();
        for apdu in [
            vec![0x00, 0xA4, 0x04, 0x00, 0x07, 0xD2, 0x76, 0x00, 0x00, 0x85, 0x01, 0x01, 0x00],
            vec![0x00, 0xA4, 0x00, 0x0C, 0x02, 0xE1, 0x04],
            vec![0x00, 0xB0, 0x00, 0x00, 0x02],
            vec![0x00, 0xB0, 0x00, 0x02, file.len() as u8 - 2],
        ] {
            ch.push_response(initiator(&apdu));
            ch.push_response(vec![0x00]);
        }
        ch.push_response(vec![0x29]);

        let emu = emulator(ch);
        let end = emu.run_session(&token).await.unwrap();
        assert!(matches!(end, SessionEnd::Disconnected(Error::NoReaderPresent)));

        let writes = emu.with_chip(|c| Ok(c.channel().commands())).await.unwrap();
        let sent = responses(&writes);
        assert_eq!(sent[0], vec![0x90, 0x00]);
        assert_eq!(sent[1], vec![0x90, 0x00]);
        assert_eq!(sent[2], [&file[..2], &[0x90, 0x00][..]].concat());
        assert_eq!(sent[3], [&file[2..], &[0x90, 0x00][..]].concat());
    }

    #[tokio::test]
    async fn session_without_token_ends() {
        let holder = TokenHolder::new();
        let mut ch = MockChannel::new();
        ch.push_response(initiator(&[0x00, 0xA4, 0x00, 0x0C, 0x02, 0xE1, 0x04]));
        ch.push_response(vec![0x00]);
        ch.push_response(initiator(&[0x00, 0xB0, 0x00, 0x00, 0x02]));
        ch.push_response(vec![0x00]);

        let emu = emulator(ch);
        let end = emu.run_session(&holder).await.unwrap();
        assert!(matches!(end, SessionEnd::TokenUnavailable));
        let writes = emu.with_chip(|c| Ok(c.channel().commands())).await.unwrap();
        assert_eq!(responses(&writes)[1], vec![0x6A, 0x82]);
    }

    #[tokio::test]
    async fn session_with_oversized_token_ends() {
        let token = Token::new("x".repeat(250));
        let mut ch = MockChannel::new();
        ch.push_response(initiator(&[0x00, 0xA4, 0x00, 0x0C, 0x02, 0xE1, 0x04]));
        ch.push_response(vec![0x00]);
        ch.push_response(initiator(&[0x00, 0xB0, 0x00, 0x00, 0x02]));
        ch.push_response(vec![0x00]);

        let emu = emulator(ch);
        let end = emu.run_session(&token).await.unwrap();
        assert!(matches!(end, SessionEnd::TokenUnavailable));
        let writes = emu.with_chip(|c| Ok(c.channel().commands())).await.unwrap();
        let sent = responses(&writes);
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1], vec![0x6A, 0x82]);
    }

    #[tokio::test]
    async fn cancelled_session_stops_before_next_apdu() {
        let emu = emulator(MockChannel::new());
        emu.cancel();
        let end = emu.run_session(&Token::from("t")).await.unwrap();
        assert!(matches!(end, SessionEnd::Cancelled));
        let writes = emu.with_chip(|c| Ok(c.channel().commands())).await.unwrap();
        assert!(writes.is_empty());
        emu.resume();
        assert!(!emu.is_cancelled());
    }

    #[tokio::test]
    async fn oversized_initiator_data_is_an_error() {
        let mut ch = MockChannel::new();
        ch.push_response(vec![0u8; 41]);
        let emu = emulator(ch);
        assert!(matches!(
            emu.run_session(&Token::from("t")).await,
            Err(Error::BufferTooSmall { .. })
        ));
    }

    #[tokio::test]
    async fn run_forever_cycles_until_cancelled() {
        let mut ch = MockChannel::new();
        ch.push_response(vec![0x08]);
        ch.push_response(initiator(&[0x00, 0xA4, 0x00, 0x0C, 0x02, 0xE1, 0x03]));
        ch.push_response(vec![0x00]);
        ch.push_response(vec![0x29]);
        ch.push_response(vec![0x00]);
        let emu = Arc::new(emulator(ch));

        let runner = Arc::clone(&emu);
        let handle = tokio::spawn(async move { runner.run_forever(&Token::from("t")).await });
        tokio::time::sleep(Duration::from_millis(50)).await;
        emu.cancel();
        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());

        let writes = emu.with_chip(|c| Ok(c.channel().commands())).await.unwrap();
        assert_eq!(writes[0][0], 0x8C);
        assert_eq!(writes[1], vec![0x86]);
        assert_eq!(writes[2], vec![0x8E, 0x90, 0x00]);
        assert_eq!(writes[3], vec![0x86]);
        assert_eq!(writes[4], vec![0x52, 0x00]);
    }
}
