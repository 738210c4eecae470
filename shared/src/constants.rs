pub const API_BASE_URL: &str = "http://localhost:8080";
pub const REGISTER_ENDPOINT: &str = "/register";
pub const LOGIN_ENDPOINT: &str = "/login";
pub const WIN_ENDPOINT: &str = "/win";
pub const PURCHASE_ENDPOINT: &str = "/purchase";

pub const WHEEL_COUNT: usize = 3;
pub const SPIN_COST: i64 = 1;
pub const WIN_AMOUNT: i64 = 50;
pub const PURCHASE_AMOUNT: i64 = 10;
pub const INITIAL_BALANCE: i64 = 100;

pub const MISSING_CREDENTIALS_ERROR: &str = "Username and password are required.";
pub const NETWORK_ERROR: &str = "Network error. Please try again later.";
pub const BUSY_ERROR: &str = "Please wait for the current request to finish.";
pub const INSUFFICIENT_BALANCE_ERROR: &str = "Not enough balance to play!";
pub const SETTLEMENT_ERROR: &str = "Error updating winnings. Please contact maintenance.";
pub const INVALID_CREDENTIALS_FALLBACK: &str = "Invalid credentials";
pub const UNKNOWN_ERROR_FALLBACK: &str = "Unknown error";

pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const REGISTER_SUCCESS: &str = "Registration successful! Please log in.";
pub const TRY_AGAIN: &str = "Try again!";
