//! Client constants
//!
//! Centralized location for protocol markers and service paths used by the
//! connector and the service catalog.

// Response classification
pub const HTTP_ERROR_THRESHOLD: u16 = 400;
pub const NO_STATUS_MESSAGE: &str = "no status returned";

// CAS handshake
pub const LOGIN_TICKET_FIELD: &str = "lt";
pub const LOGIN_SUCCESS_MARKER: &str = "class=\"success\"";
pub const LOGIN_EVENT_ID: &str = "submit";

// Membership payloads
pub const GROUP_AUTHORITY_PREFIX: &str = "GROUP_";
pub const AUTHORITY_TYPE_USER: &str = "USER";

// Repository service paths (relative to the service root)
pub const PEOPLE_PATH: &str = "api/people";
pub const PROFILE_PATH: &str = "sv-theme/user-profile/internal-profile";
pub const SECURITY_MODEL_PATH: &str = "surevine/security-model";
pub const UPLOAD_PATH: &str = "api/upload.html";

// Security model upload
pub const SECURITY_MODEL_NODE_REF: &str = "workspace://SpacesStore/enhanced_security_custom_model";
pub const SECURITY_MODEL_FILE_NAME: &str = "enhancedSecurityCustomModel.xml";
pub const SECURITY_MODEL_MIME: &str = "text/xml";

// HTTP defaults
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("cmslink/", env!("CARGO_PKG_VERSION"));
