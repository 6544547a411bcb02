use socialhub_types::AccountRef;

/// Malformed group state, raised when building a group and never while advancing it.
#[derive(Debug, thiserror::Error)]
pub enum GroupError {
    #[error("DuplicateAccount: account({0}) is already in the group")]
    DuplicateAccount(AccountRef),
}
