//! Exit codes for sagectl

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when the safety filter rejected the question
pub const EXIT_INPUT_BLOCKED: i32 = 65;

/// Exit code when the generation service is unreachable
pub const EXIT_LLM_UNAVAILABLE: i32 = 70;
