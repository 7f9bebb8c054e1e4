use solana_sdk::{
    message::{v0, VersionedMessage},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::VersionedTransaction,
};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("KEYPAIR_PATH environment variable is not set")]
    NotConfigured,
    #[error("Keypair file not found at {0}")]
    NotFound(String),
    #[error("Permission denied reading keypair file at {0}")]
    PermissionDenied(String),
    #[error("Error reading keypair file: {0}")]
    ReadError(std::io::Error),
    #[error("Failed to load keypair from file: {0}")]
    LoadError(String),
    #[error("Invalid keypair bytes: {0}")]
    InvalidKeypair(String),
    #[error("Failed to sign transaction message")]
    SigningError(String),
}

impl WalletError {
    fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            ErrorKind::NotFound => WalletError::NotFound(path.display().to_string()),
            ErrorKind::PermissionDenied => WalletError::PermissionDenied(path.display().to_string()),
            _ => WalletError::ReadError(err),
        }
    }
}

/// Keypair file on disk (JSON array of secret key bytes).
///
/// Read on every `load`; nothing is cached between tool calls.
#[derive(Debug, Clone)]
pub struct KeypairFile {
    path: PathBuf,
}

impl KeypairFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Build from an optional configured path
    pub fn from_config(path: Option<PathBuf>) -> Result<Self, WalletError> {
        path.map(Self::new).ok_or(WalletError::NotConfigured)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check the file can be read, with a distinct error per cause
    pub fn verify(&self) -> Result<(), WalletError> {
        fs::read_to_string(&self.path)
            .map(|_| ())
            .map_err(|e| WalletError::from_io(&self.path, e))
    }

    /// Read and parse the keypair into a signer
    pub fn load(&self) -> Result<WalletManager, WalletError> {
        WalletManager::from_file(&self.path)
    }
}

/// Wallet manager for loading and signing with Solana keypairs
pub struct WalletManager {
    keypair: Keypair,
}

impl WalletManager {
    /// Load keypair from a file path (JSON array format)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WalletError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| WalletError::from_io(path, e))?;

        let bytes: Vec<u8> = serde_json::from_str(&contents)
            .map_err(|e| WalletError::LoadError(format!("Invalid JSON format: {}", e)))?;

        Self::from_bytes(&bytes)
    }

    /// Load keypair from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WalletError> {
        let keypair = Keypair::try_from(bytes)
            .map_err(|e| WalletError::InvalidKeypair(e.to_string()))?;

        Ok(Self { keypair })
    }

    /// Create a new random keypair (for testing)
    pub fn new_random() -> Self {
        Self {
            keypair: Keypair::new(),
        }
    }

    /// Get the public key as a string
    pub fn public_key(&self) -> String {
        self.keypair.pubkey().to_string()
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// Sign a v0 message, producing a transaction ready to submit
    pub fn sign_message_v0(&self, message: v0::Message) -> Result<VersionedTransaction, WalletError> {
        VersionedTransaction::try_new(VersionedMessage::V0(message), &[&self.keypair])
            .map_err(|e| {
                tracing::warn!("Signing failed: {}", e);
                WalletError::SigningError(e.to_string())
            })
    }

    /// Export keypair as bytes (use with caution)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.keypair.to_bytes().to_vec()
    }

    /// Save keypair to file (JSON array format)
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), WalletError> {
        let json = serde_json::to_string(&self.to_bytes())
            .map_err(|e| WalletError::LoadError(format!("Failed to serialize: {}", e)))?;

        fs::write(path.as_ref(), json).map_err(|e| WalletError::from_io(path.as_ref(), e))
    }
}
