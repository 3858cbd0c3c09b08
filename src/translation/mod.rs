mod client;
mod language;
mod sign;
mod throttle;

pub use client::{BaiduClient, Credentials, DEFAULT_ENDPOINT, TranslationRequest, Translator};
pub use language::{
    AUTO_DETECT, SUPPORTED_LANGUAGES, print_languages, validate_source_language,
    validate_target_language,
};
pub use sign::{SALT_RANGE, generate_salt, sign};
pub use throttle::Throttle;
