//! Identity service.

use chrono::Utc;
use uuid::Uuid;

use super::types::{LoginIdentity, ProfileUpdate, Registration, UserProfile};
use crate::auth::CredentialHasher;
use crate::ledger::LedgerError;
use crate::ledger::engine::resolve_user;
use crate::store::{AccountStore, IdentityStore, NewUser, RevocationStore, UserChanges, UserRecord};

/// User lifecycle operations.
pub struct IdentityService;

impl IdentityService {
    /// Registers a new user with a hashed credential.
    ///
    /// The email is stored lower-cased.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if any user, active or not, already holds the
    /// username or the email.
    pub async fn register<S, H>(
        store: &mut S,
        hasher: &H,
        registration: Registration,
    ) -> Result<UserRecord, LedgerError>
    where
        S: IdentityStore,
        H: CredentialHasher + ?Sized,
    {
        let email = registration.email.to_lowercase();

        if store.identity_taken(&registration.username, &email).await? {
            return Err(LedgerError::AlreadyExists);
        }

        let credential = hasher.hash(&registration.password)?;
        let user = store
            .insert_user(NewUser {
                username: registration.username,
                email,
                first_name: registration.first_name,
                last_name: registration.last_name,
                credential,
                created_at: Utc::now(),
            })
            .await?;

        Ok(user)
    }

    /// Checks a password for an active user found by username or email.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if no active user matches, or
    /// `InvalidCredentials` if the password does not verify.
    pub async fn authenticate<S, H>(
        store: &mut S,
        hasher: &H,
        identity: &LoginIdentity,
        password: &str,
    ) -> Result<UserRecord, LedgerError>
    where
        S: IdentityStore,
        H: CredentialHasher + ?Sized,
    {
        let user = match identity {
            LoginIdentity::Username(username) => store.find_user_by_username(username).await?,
            LoginIdentity::Email(email) => store.find_user_by_email(&email.to_lowercase()).await?,
        }
        .ok_or(LedgerError::UserNotFound)?;

        if !hasher.verify(password, &user.credential)? {
            return Err(LedgerError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Updates names and/or password. A new password gets a new salt.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the user is missing or inactive.
    pub async fn update<S, H>(
        store: &mut S,
        hasher: &H,
        username: &str,
        update: ProfileUpdate,
    ) -> Result<(), LedgerError>
    where
        S: IdentityStore,
        H: CredentialHasher + ?Sized,
    {
        let user = resolve_user(store, username).await?;

        let credential = match non_empty(update.new_password) {
            Some(password) => Some(hasher.hash(&password)?),
            None => None,
        };
        let changes = UserChanges {
            first_name: non_empty(update.first_name),
            last_name: non_empty(update.last_name),
            credential,
        };

        if !changes.is_empty() {
            store.update_user(user.id, changes).await?;
        }
        Ok(())
    }

    /// Returns the public profile of an active user.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the user is missing or inactive.
    pub async fn profile<S: IdentityStore>(
        store: &mut S,
        username: &str,
    ) -> Result<UserProfile, LedgerError> {
        resolve_user(store, username).await.map(UserProfile::from)
    }

    /// Deactivates the user and every account they own.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound`, or `NonZeroBalance` carrying the first account
    /// (by id) that still holds funds. Nothing is deactivated in that case.
    pub async fn deactivate<S>(store: &mut S, username: &str) -> Result<(), LedgerError>
    where
        S: IdentityStore + AccountStore,
    {
        let user = resolve_user(store, username).await?;

        let ids: Vec<_> = store
            .accounts_by_user(user.id)
            .await?
            .iter()
            .map(|account| account.id)
            .collect();
        store.lock_accounts(&ids).await?;

        let accounts = store.accounts_by_user(user.id).await?;
        if let Some(funded) = accounts.iter().find(|account| !account.balance.is_zero()) {
            return Err(LedgerError::NonZeroBalance(funded.id));
        }

        for account in &accounts {
            store.deactivate_account(account.id).await?;
        }
        store.deactivate_user(user.id).await?;
        Ok(())
    }

    /// Revokes a token presented by an active user.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the user is missing or inactive.
    pub async fn revoke_token<S>(store: &mut S, username: &str, jti: Uuid) -> Result<(), LedgerError>
    where
        S: IdentityStore + RevocationStore,
    {
        resolve_user(store, username).await?;
        store.revoke(jti, Utc::now()).await?;
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
