use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

/// One-way, salted password hashing. bcrypt embeds the salt in the hash
/// string, so verification needs no extra state.
pub struct PasswordService;

impl PasswordService {
    pub fn hash_password(password: &str) -> Result<String, BcryptError> {
        hash(password, DEFAULT_COST)
    }

    pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, BcryptError> {
        verify(password, password_hash)
    }
}
