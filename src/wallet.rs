/// Demo wallet address shown once the simulated handshake completes.
pub const DEMO_ADDRESS: &str = "0x1234...5678";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalletState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Connect/disconnect state machine for the mock wallet. The actual delay
/// lives in the timer hub; this only tracks which phase we are in.
#[derive(Debug, Default)]
pub struct Wallet {
    state: WalletState,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> WalletState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == WalletState::Connected
    }

    pub fn is_connecting(&self) -> bool {
        self.state == WalletState::Connecting
    }

    /// Begin the handshake. Returns true when a connect timer should be
    /// started; no-op while connecting or already connected.
    pub fn begin_connect(&mut self) -> bool {
        if self.state == WalletState::Disconnected {
            self.state = WalletState::Connecting;
            true
        } else {
            false
        }
    }

    /// Handshake timer fired. Ignored unless we are still waiting on it, so
    /// a disconnect issued mid-handshake stays disconnected.
    pub fn finish_connect(&mut self) -> bool {
        if self.state == WalletState::Connecting {
            self.state = WalletState::Connected;
            true
        } else {
            false
        }
    }

    pub fn disconnect(&mut self) {
        self.state = WalletState::Disconnected;
    }

    /// Address to display, present only while connected.
    pub fn address(&self) -> Option<&'static str> {
        match self.state {
            WalletState::Connected => Some(DEMO_ADDRESS),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_flow() {
        let mut wallet = Wallet::new();
        assert_eq!(wallet.state(), WalletState::Disconnected);
        assert!(wallet.address().is_none());

        assert!(wallet.begin_connect());
        assert!(wallet.is_connecting());
        assert!(wallet.address().is_none());
        // second press while connecting does nothing
        assert!(!wallet.begin_connect());

        assert!(wallet.finish_connect());
        assert!(wallet.is_connected());
        assert_eq!(wallet.address(), Some("0x1234...5678"));
        // already connected, no new handshake
        assert!(!wallet.begin_connect());
    }

    #[test]
    fn test_late_completion_after_disconnect_is_ignored() {
        let mut wallet = Wallet::new();
        assert!(wallet.begin_connect());
        wallet.disconnect();
        // the 2s timer from the abandoned handshake fires now
        assert!(!wallet.finish_connect());
        assert_eq!(wallet.state(), WalletState::Disconnected);
        assert!(wallet.address().is_none());
    }

    #[test]
    fn test_disconnect_from_connected() {
        let mut wallet = Wallet::new();
        wallet.begin_connect();
        wallet.finish_connect();
        wallet.disconnect();
        assert_eq!(wallet.state(), WalletState::Disconnected);
    }
}
