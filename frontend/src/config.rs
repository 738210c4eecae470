use slots_shared::constants::API_BASE_URL;

/// The game server lives at a fixed local address; there is no override.
pub fn api_base_url() -> &'static str {
    API_BASE_URL
}
