// pn532tag/src/token.rs

//! Token sources for the emulated tag

use std::sync::{Arc, RwLock};

use log::info;

pub use crate::types::Token;

/// Supplies the token embedded in the NDEF file. Read once per READ BINARY
/// on the NDEF file; `None` means there is nothing to hand out.
pub trait TokenSource: Send + Sync {
    /// Token to serve now
    fn current_token(&self) -> Option<Token>;
}

impl TokenSource for Token {
    fn current_token(&self) -> Option<Token> {
        Some(self.clone())
    }
}

impl TokenSource for Option<Token> {
    fn current_token(&self) -> Option<Token> {
        self.clone()
    }
}

impl<T: TokenSource + ?Sized> TokenSource for Arc<T> {
    fn current_token(&self) -> Option<Token> {
        (**self).current_token()
    }
}

/// Shared slot holding the currently valid token.
#[derive(Debug, Default)]
pub struct TokenHolder {
    current: RwLock<Option<Token>>,
}

impl TokenHolder {
    /// Holder without a token
    pub fn new() -> Self {
        Self::default()
    }

    /// Holder starting with `token`
    pub fn with_token(token: Token) -> Self {
        Self {
            current: RwLock::new(Some(token)),
        }
    }

    /// Replace the current token.
    pub fn update(&self, token: Token) {
        info!("token updated");
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(token);
    }

    /// Drop the current token; readers get nothing until the next update.
    pub fn disable(&self) {
        info!("token disabled");
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Whether a token is held
    pub fn active(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

impl TokenSource for TokenHolder {
    fn current_token(&self) -> Option<Token> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
