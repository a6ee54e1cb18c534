/// Application name
pub const APP_NAME: &str = "Placement Desk";

/// Store collection names
pub const USERS_COLLECTION: &str = "users";
pub const CANDIDATES_COLLECTION: &str = "candidates";
pub const RECRUITERS_COLLECTION: &str = "recruiters";
pub const OFFERS_COLLECTION: &str = "offers";

/// Inclusive bounds for a candidate's marks
pub const MIN_MARKS: f64 = 0.0;
pub const MAX_MARKS: f64 = 100.0;

/// Filter selector that matches every qualification
pub const QUALIFICATION_ALL: &str = "All";

/// Qualifications a candidate can pick on the profile screen
pub const QUALIFICATIONS: &[&str] = &[
    "B.Tech",
    "M.Tech",
    "BE",
    "BCA",
    "MCA",
    "Diploma in CS",
    "Diploma in IT",
    "Diploma in BIOMED",
    "Diploma in MECH",
    "B.COM",
    "M.COM",
    "CA",
    "BA",
    "BBA",
    "LLB",
    "B.Ed",
    "Other",
];

/// Key derivation context for password hashes (BLAKE3)
pub const KDF_CONTEXT_PASSWORD: &str = "placement-desk-password-v1";

/// Default cap on store operations running at once
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;
