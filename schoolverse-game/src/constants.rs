//! Centralized balance constants for the SchoolVerse economy.
//!
//! Coin amounts and selection caps live here so that tuning the economy is a
//! reviewed code change rather than an edit to an external asset.

// Profile defaults ---------------------------------------------------------
pub const DEFAULT_STARTING_COINS: u32 = 250;
pub const INTEREST_LIMIT: usize = 5;

// Coin rewards -------------------------------------------------------------
pub(crate) const REWARD_TEACHER_MET: u32 = 10;
pub(crate) const REWARD_ROOM_EXPLORED: u32 = 15;
pub(crate) const REWARD_QUIZ_ANSWER: u32 = 25;
pub(crate) const REWARD_DAILY_CHALLENGE: u32 = 50;

// Catalog validation -------------------------------------------------------
pub(crate) const ITEM_ID_PATTERN: &str = r"^[a-z][a-z0-9_-]*$";

// Notice messages ----------------------------------------------------------
pub(crate) const NOTICE_ALREADY_OWNED: &str = "You already own this decoration!";
pub(crate) const NOTICE_INSUFFICIENT_FUNDS: &str =
    "Not enough coins! Complete challenges to earn more.";
pub(crate) const NOTICE_UNAVAILABLE_SUFFIX: &str = "is not available yet";
pub const NOTICE_QUEUE_LIMIT: usize = 32;
