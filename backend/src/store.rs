use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::collections::{HashMap, HashSet};

use crate::error::WalletError;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub player_id: String,
    pub name: String,
    pub password_hash: String,
    pub balance: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Win,
    Purchase,
}

/// In-memory ledger. Lost when the process exits.
#[derive(Debug, Default)]
pub struct WalletStore {
    players: HashMap<String, Player>,
    // Keyed per player: the browser restarts its counter at 1 on every page load.
    transactions: HashSet<(String, u64)>,
}

pub fn hash_password(password: &str) -> Result<String, WalletError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| WalletError::Internal(e.to_string()))
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

impl WalletStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.get(player_id)
    }

    pub fn balance(&self, player_id: &str) -> Option<i64> {
        self.players.get(player_id).map(|player| player.balance)
    }

    pub fn player_exists(&self, player_id: &str) -> bool {
        self.players.contains_key(player_id)
    }

    pub fn insert_player(&mut self, player: Player) -> Result<(), WalletError> {
        if player.balance <= 0 {
            return Err(WalletError::InvalidInput);
        }
        if self.players.contains_key(&player.player_id) {
            return Err(WalletError::UsernameTaken);
        }
        self.players.insert(player.player_id.clone(), player);
        Ok(())
    }

    /// Credits `amount` and returns the new balance.
    pub fn process_win(&mut self, player_id: &str, transaction_id: u64, amount: i64) -> Result<i64, WalletError> {
        self.apply(player_id, transaction_id, amount, TransactionKind::Win)
    }

    /// Debits `amount` and returns the new balance.
    pub fn process_purchase(&mut self, player_id: &str, transaction_id: u64, amount: i64) -> Result<i64, WalletError> {
        self.apply(player_id, transaction_id, amount, TransactionKind::Purchase)
    }

    fn apply(
        &mut self,
        player_id: &str,
        transaction_id: u64,
        amount: i64,
        kind: TransactionKind,
    ) -> Result<i64, WalletError> {
        if amount <= 0 {
            return Err(WalletError::InvalidAmount);
        }
        let key = (player_id.to_string(), transaction_id);
        if self.transactions.contains(&key) {
            return Err(WalletError::DuplicateTransaction);
        }
        let player = self
            .players
            .get_mut(player_id)
            .ok_or(WalletError::PlayerNotFound)?;

        let new_balance = match kind {
            TransactionKind::Win => player
                .balance
                .checked_add(amount)
                .ok_or(WalletError::InvalidAmount)?,
            TransactionKind::Purchase if player.balance < amount => {
                return Err(WalletError::InsufficientFunds)
            }
            TransactionKind::Purchase => player.balance - amount,
        };

        player.balance = new_balance;
        self.transactions.insert(key);
        Ok(new_balance)
    }
}
