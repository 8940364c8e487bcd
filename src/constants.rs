// Messages
pub const MESSAGE_CONTENT_MISSING: &str = "content missing";
pub const MESSAGE_MALFORMED_ID: &str = "malformed id";
pub const MESSAGE_UNKNOWN_ENDPOINT: &str = "unknown endpoint";
pub const MESSAGE_INTERNAL_SERVER_ERROR: &str = "Internal server error";
pub const MESSAGE_INVALID_PHONE_NUMBER: &str = "Invalid phone number format";
pub const MESSAGE_NUMBER_REQUIRED: &str = "number is required";

// Person field constraints
pub const CONTENT_MIN_LENGTH: usize = 3;
pub const PHONE_NUMBER_PATTERN: &str = r"^[0-9]{2,3}-[0-9]{5,}$";

// Redis keys
pub const PERSONS_HASH_KEY: &str = "phonebook:persons";

// Defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_REDIS_POOL_SIZE: u32 = 8;
