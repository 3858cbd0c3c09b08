use rand::Rng;

/// Salt range required by the Baidu API (`[32768, 65536)`).
pub const SALT_RANGE: std::ops::Range<u32> = 32_768..65_536;

/// Generates a random request salt.
pub fn generate_salt() -> u32 {
    rand::rng().random_range(SALT_RANGE)
}

/// Computes the request signature: lowercase hex MD5 of
/// `app_id + query + salt + secret_key`.
pub fn sign(app_id: &str, query: &str, salt: u32, secret_key: &str) -> String {
    let payload = format!("{app_id}{query}{salt}{secret_key}");
    format!("{:x}", md5::compute(payload.as_bytes()))
}
