use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;

use crate::api::{ApiError, GameApi, LoginRequest, RegisterRequest, WinRequest};
use crate::constants::*;
use crate::slot_game::{draw_outcome, SpinOutcome};
use crate::validation::validate_credentials;

/// Which panel is on screen.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Register,
    Game,
}

/// The player's identity and locally cached balance for one page load.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Session {
    pub username: String,
    pub is_logged_in: bool,
    pub balance: i64,
    /// Last settlement id handed out, `None` until the first win.
    pub transaction_counter: Option<u64>,
}

impl Session {
    pub fn next_transaction_id(&mut self) -> u64 {
        let id = self.transaction_counter.map_or(1, |last| last + 1);
        self.transaction_counter = Some(id);
        id
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_error: false }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_error: true }
    }
}

/// Everything a renderer needs to draw the page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct UiState {
    pub view: View,
    pub session: Session,
    pub notice: Option<Notice>,
    pub reels: Option<SpinOutcome>,
}

/// Receives a snapshot after every state change.
pub trait Renderer {
    fn render(&self, state: &UiState);
}

// === Errors ===

#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    MissingCredentials,
    Busy,
    Rejected(String),
    Network,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredentials => f.write_str(MISSING_CREDENTIALS_ERROR),
            Self::Busy => f.write_str(BUSY_ERROR),
            Self::Rejected(reason) => write!(f, "Login failed: {}", reason),
            Self::Network => f.write_str(NETWORK_ERROR),
        }
    }
}

impl std::error::Error for AuthError {}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationError {
    MissingCredentials,
    Busy,
    Rejected(String),
    Network,
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredentials => f.write_str(MISSING_CREDENTIALS_ERROR),
            Self::Busy => f.write_str(BUSY_ERROR),
            Self::Rejected(reason) => write!(f, "Registration failed: {}", reason),
            Self::Network => f.write_str(NETWORK_ERROR),
        }
    }
}

impl std::error::Error for RegistrationError {}

#[derive(Debug, Clone, PartialEq)]
pub enum SettlementError {
    Rejected { status: u16 },
    Network,
}

impl fmt::Display for SettlementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { .. } => f.write_str(SETTLEMENT_ERROR),
            Self::Network => f.write_str(NETWORK_ERROR),
        }
    }
}

impl std::error::Error for SettlementError {}

#[derive(Debug, Clone, PartialEq)]
pub enum SpinError {
    InsufficientBalance,
    Busy,
}

impl fmt::Display for SpinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientBalance => f.write_str(INSUFFICIENT_BALANCE_ERROR),
            Self::Busy => f.write_str(BUSY_ERROR),
        }
    }
}

impl std::error::Error for SpinError {}

/// What happened during one paid spin.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinReport {
    pub outcome: SpinOutcome,
    pub transaction_id: Option<u64>,
    /// `None` when the spin lost and nothing was settled.
    pub settlement: Option<Result<(), SettlementError>>,
}

// === Controller ===

/// Held for the duration of a network-bearing operation.
struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        Some(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Owns the session and drives every user action against the game server.
///
/// All methods take `&self` so the controller can sit behind an `Rc` shared by UI
/// callbacks. State borrows never span an `.await`.
pub struct SessionController<A, V, R> {
    api: A,
    renderer: V,
    rng: RefCell<R>,
    state: RefCell<UiState>,
    in_flight: Cell<bool>,
}

impl<A, V, R> SessionController<A, V, R>
where
    A: GameApi,
    V: Renderer,
    R: Rng,
{
    pub fn new(api: A, renderer: V, rng: R) -> Self {
        Self {
            api,
            renderer,
            rng: RefCell::new(rng),
            state: RefCell::new(UiState::default()),
            in_flight: Cell::new(false),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn renderer(&self) -> &V {
        &self.renderer
    }

    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    pub fn session(&self) -> Session {
        self.state.borrow().session.clone()
    }

    pub fn balance(&self) -> i64 {
        self.state.borrow().session.balance
    }

    pub fn view(&self) -> View {
        self.state.borrow().view
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    /// Pushes the current state to the renderer.
    pub fn render(&self) {
        self.renderer.render(&self.state.borrow());
    }

    fn update(&self, apply: impl FnOnce(&mut UiState)) {
        apply(&mut self.state.borrow_mut());
        self.render();
    }

    fn notify(&self, notice: Notice) {
        self.update(|state| state.notice = Some(notice));
    }

    pub fn set_view(&self, view: View) {
        self.update(|state| state.view = view);
    }

    /// Local top-up. The server never hears about it.
    pub fn purchase_credit(&self) {
        self.update(|state| state.session.balance += PURCHASE_AMOUNT);
        log::info!("Purchased {} credits locally", PURCHASE_AMOUNT);
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if validate_credentials(username, password).is_err() {
            return Err(self.fail_login(AuthError::MissingCredentials));
        }
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            return Err(self.fail_login(AuthError::Busy));
        };

        let request = LoginRequest {
            player_id: username.to_string(),
            password: password.to_string(),
        };

        match self.api.login(&request).await {
            Ok(response) => {
                log::info!("Logged in as {} with balance {}", username, response.balance);
                self.update(|state| {
                    state.session.is_logged_in = true;
                    state.session.username = username.to_string();
                    state.session.balance = response.balance;
                    state.notice = Some(Notice::info(LOGIN_SUCCESS));
                    state.view = View::Game;
                });
                Ok(())
            }
            Err(ApiError::Rejected { message, .. }) => {
                let reason = message.unwrap_or_else(|| INVALID_CREDENTIALS_FALLBACK.to_string());
                Err(self.fail_login(AuthError::Rejected(reason)))
            }
            Err(ApiError::Transport(e)) => {
                log::error!("Error during login: {}", e);
                Err(self.fail_login(AuthError::Network))
            }
        }
    }

    fn fail_login(&self, error: AuthError) -> AuthError {
        self.notify(Notice::error(error.to_string()));
        error
    }

    /// Creates an account with the starting balance. Does not log in.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), RegistrationError> {
        if validate_credentials(username, password).is_err() {
            return Err(self.fail_registration(RegistrationError::MissingCredentials));
        }
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            return Err(self.fail_registration(RegistrationError::Busy));
        };

        let request = RegisterRequest {
            player_id: username.to_string(),
            password: password.to_string(),
            name: username.to_string(),
            balance: INITIAL_BALANCE,
        };

        match self.api.register(&request).await {
            Ok(()) => {
                log::info!("Registered {}", username);
                self.update(|state| {
                    state.notice = Some(Notice::info(REGISTER_SUCCESS));
                    state.view = View::Login;
                });
                Ok(())
            }
            Err(ApiError::Rejected { message, .. }) => {
                let reason = message.unwrap_or_else(|| UNKNOWN_ERROR_FALLBACK.to_string());
                Err(self.fail_registration(RegistrationError::Rejected(reason)))
            }
            Err(ApiError::Transport(e)) => {
                log::error!("Error during registration: {}", e);
                Err(self.fail_registration(RegistrationError::Network))
            }
        }
    }

    fn fail_registration(&self, error: RegistrationError) -> RegistrationError {
        self.notify(Notice::error(error.to_string()));
        error
    }

    /// Charges one credit, draws the wheels and settles a win with the server.
    ///
    /// The charge is never refunded: when settlement fails the player keeps the
    /// debited balance and sees an error.
    pub async fn spin(&self) -> Result<SpinReport, SpinError> {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            self.notify(Notice::error(BUSY_ERROR));
            return Err(SpinError::Busy);
        };

        if self.balance() < SPIN_COST {
            self.notify(Notice::info(INSUFFICIENT_BALANCE_ERROR));
            return Err(SpinError::InsufficientBalance);
        }

        self.update(|state| state.session.balance -= SPIN_COST);

        let outcome = draw_outcome(&mut *self.rng.borrow_mut());
        self.update(|state| state.reels = Some(outcome));
        log::info!("Spin results: {:?}", outcome.symbols);
        log::info!("Win condition: {}", outcome.is_win());

        if !outcome.is_win() {
            self.notify(Notice::info(TRY_AGAIN));
            return Ok(SpinReport {
                outcome,
                transaction_id: None,
                settlement: None,
            });
        }

        let (player_id, transaction_id) = {
            let mut state = self.state.borrow_mut();
            let id = state.session.next_transaction_id();
            (state.session.username.clone(), id)
        };
        let settlement = self.report_win(&player_id, transaction_id, WIN_AMOUNT).await;

        Ok(SpinReport {
            outcome,
            transaction_id: Some(transaction_id),
            settlement: Some(settlement),
        })
    }

    /// Claims `amount` from the server and credits it locally once acknowledged.
    /// Single shot: a failure is reported, never retried.
    pub async fn report_win(
        &self,
        player_id: &str,
        transaction_id: u64,
        amount: i64,
    ) -> Result<(), SettlementError> {
        let request = WinRequest {
            player_id: player_id.to_string(),
            transaction_id,
            amount,
        };
        log::info!("Calling {} with {:?}", WIN_ENDPOINT, request);

        match self.api.report_win(&request).await {
            Ok(()) => {
                self.update(|state| {
                    state.session.balance += amount;
                    state.notice = Some(Notice::info(format!(
                        "You win! Added {} to your balance.",
                        amount
                    )));
                });
                Ok(())
            }
            Err(ApiError::Rejected { status, .. }) => {
                log::error!("Win API error: {}", status);
                let error = SettlementError::Rejected { status };
                self.notify(Notice::error(error.to_string()));
                Err(error)
            }
            Err(ApiError::Transport(e)) => {
                log::error!("Error during win API call: {}", e);
                let error = SettlementError::Network;
                self.notify(Notice::error(error.to_string()));
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::LoginResponse;
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use rand::rngs::mock::StepRng;

    struct MockApi {
        login: Result<LoginResponse, ApiError>,
        register: Result<(), ApiError>,
        win: Result<(), ApiError>,
        gate: RefCell<Option<oneshot::Receiver<()>>>,
        calls: RefCell<Vec<&'static str>>,
        registrations: RefCell<Vec<RegisterRequest>>,
        wins: RefCell<Vec<WinRequest>>,
    }

    impl Default for MockApi {
        fn default() -> Self {
            Self {
                login: Ok(LoginResponse { player_id: None, balance: 0 }),
                register: Ok(()),
                win: Ok(()),
                gate: RefCell::new(None),
                calls: RefCell::new(Vec::new()),
                registrations: RefCell::new(Vec::new()),
                wins: RefCell::new(Vec::new()),
            }
        }
    }

    impl MockApi {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.borrow().clone()
        }

        async fn wait_for_gate(&self) {
            let gate = self.gate.borrow_mut().take();
            if let Some(rx) = gate {
                rx.await.ok();
            }
        }
    }

    #[async_trait(?Send)]
    impl GameApi for MockApi {
        async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
            self.calls.borrow_mut().push("register");
            self.registrations.borrow_mut().push(request.clone());
            self.wait_for_gate().await;
            self.register.clone()
        }

        async fn login(&self, _request: &LoginRequest) -> Result<LoginResponse, ApiError> {
            self.calls.borrow_mut().push("login");
            self.wait_for_gate().await;
            self.login.clone()
        }

        async fn report_win(&self, request: &WinRequest) -> Result<(), ApiError> {
            self.calls.borrow_mut().push("win");
            self.wins.borrow_mut().push(request.clone());
            self.wait_for_gate().await;
            self.win.clone()
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        frames: RefCell<Vec<UiState>>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&self, state: &UiState) {
            self.frames.borrow_mut().push(state.clone());
        }
    }

    type TestController = SessionController<MockApi, RecordingRenderer, StepRng>;

    // Every draw lands on the first face.
    fn winning_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    // Consecutive draws walk through the faces, so no spin ever matches.
    fn losing_rng() -> StepRng {
        StepRng::new(0, 1 << 62)
    }

    fn controller(api: MockApi, rng: StepRng, balance: i64) -> TestController {
        let controller = SessionController::new(api, RecordingRenderer::default(), rng);
        {
            let mut state = controller.state.borrow_mut();
            state.session.username = "alice".to_string();
            state.session.is_logged_in = true;
            state.session.balance = balance;
        }
        controller
    }

    fn notice(controller: &TestController) -> Notice {
        controller.state().notice.expect("notice should be shown")
    }

    #[test]
    fn test_starts_on_login_view() {
        let controller = SessionController::new(MockApi::default(), RecordingRenderer::default(), winning_rng());
        assert_eq!(controller.view(), View::Login);
        assert_eq!(controller.session(), Session::default());
        assert!(controller.state().reels.is_none());
    }

    #[test]
    fn test_losing_spin_deducts_one_without_network() {
        let controller = controller(MockApi::default(), losing_rng(), 5);
        let report = block_on(controller.spin()).unwrap();

        assert!(!report.outcome.is_win());
        assert_eq!(report.settlement, None);
        assert_eq!(controller.balance(), 4);
        assert_eq!(controller.state().reels, Some(report.outcome));
        assert_eq!(notice(&controller), Notice::info(TRY_AGAIN));
        assert!(controller.api().calls().is_empty());
    }

    #[test]
    fn test_spin_with_empty_balance_changes_nothing() {
        let controller = controller(MockApi::default(), winning_rng(), 0);
        let result = block_on(controller.spin());

        assert_eq!(result, Err(SpinError::InsufficientBalance));
        assert_eq!(controller.balance(), 0);
        assert!(controller.state().reels.is_none());
        assert_eq!(controller.session().transaction_counter, None);
        assert_eq!(notice(&controller).text, INSUFFICIENT_BALANCE_ERROR);
        assert!(controller.api().calls().is_empty());
    }

    #[test]
    fn test_settled_win_credits_amount() {
        let controller = controller(MockApi::default(), winning_rng(), 5);
        let report = block_on(controller.spin()).unwrap();

        assert!(report.outcome.is_win());
        assert_eq!(report.settlement, Some(Ok(())));
        assert_eq!(controller.balance(), 5 - SPIN_COST + WIN_AMOUNT);
        assert_eq!(notice(&controller), Notice::info("You win! Added 50 to your balance."));
        assert_eq!(
            controller.api().wins.borrow()[0],
            WinRequest {
                player_id: "alice".to_string(),
                transaction_id: 1,
                amount: WIN_AMOUNT,
            }
        );
    }

    #[test]
    fn test_transaction_ids_increase_by_one_per_win() {
        let controller = controller(MockApi::default(), winning_rng(), 3);
        for _ in 0..3 {
            block_on(controller.spin()).unwrap();
        }

        let ids: Vec<u64> = controller.api().wins.borrow().iter().map(|w| w.transaction_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(controller.session().transaction_counter, Some(3));
    }

    #[test]
    fn test_rejected_settlement_keeps_spin_cost() {
        let api = MockApi {
            win: Err(ApiError::Rejected { status: 500, message: None }),
            ..MockApi::default()
        };
        let controller = controller(api, winning_rng(), 5);
        let report = block_on(controller.spin()).unwrap();

        assert!(report.outcome.is_win());
        assert_eq!(report.settlement, Some(Err(SettlementError::Rejected { status: 500 })));
        assert_eq!(controller.balance(), 4);
        assert_eq!(notice(&controller), Notice::error(SETTLEMENT_ERROR));
        // The id is spent even though the claim failed.
        assert_eq!(controller.session().transaction_counter, Some(1));
    }

    #[test]
    fn test_unreachable_settlement_keeps_spin_cost() {
        let api = MockApi {
            win: Err(ApiError::Transport("connection refused".to_string())),
            ..MockApi::default()
        };
        let controller = controller(api, winning_rng(), 5);
        let report = block_on(controller.spin()).unwrap();

        assert_eq!(report.settlement, Some(Err(SettlementError::Network)));
        assert_eq!(controller.balance(), 4);
        assert_eq!(notice(&controller), Notice::error(NETWORK_ERROR));
    }

    #[test]
    fn test_login_success_loads_server_balance() {
        let api = MockApi {
            login: Ok(LoginResponse { player_id: Some("bob".to_string()), balance: 42 }),
            ..MockApi::default()
        };
        let controller = SessionController::new(api, RecordingRenderer::default(), winning_rng());
        assert_eq!(block_on(controller.login("bob", "hunter2")), Ok(()));

        let state = controller.state();
        assert_eq!(state.session.balance, 42);
        assert!(state.session.is_logged_in);
        assert_eq!(state.session.username, "bob");
        assert_eq!(state.view, View::Game);
        assert_eq!(state.notice, Some(Notice::info(LOGIN_SUCCESS)));
    }

    #[test]
    fn test_login_rejection_leaves_session_untouched() {
        let api = MockApi {
            login: Err(ApiError::Rejected { status: 401, message: Some("bad creds".to_string()) }),
            ..MockApi::default()
        };
        let controller = SessionController::new(api, RecordingRenderer::default(), winning_rng());
        let result = block_on(controller.login("bob", "wrong"));

        assert_eq!(result, Err(AuthError::Rejected("bad creds".to_string())));
        assert_eq!(controller.session(), Session::default());
        assert_eq!(controller.view(), View::Login);
        assert_eq!(notice(&controller), Notice::error("Login failed: bad creds"));
    }

    #[test]
    fn test_login_rejection_without_reason_uses_fallback() {
        let api = MockApi {
            login: Err(ApiError::Rejected { status: 401, message: None }),
            ..MockApi::default()
        };
        let controller = SessionController::new(api, RecordingRenderer::default(), winning_rng());
        block_on(controller.login("bob", "wrong")).unwrap_err();
        assert_eq!(notice(&controller).text, "Login failed: Invalid credentials");
    }

    #[test]
    fn test_login_network_failure_leaves_session_untouched() {
        let api = MockApi {
            login: Err(ApiError::Transport("dns".to_string())),
            ..MockApi::default()
        };
        let controller = controller(api, winning_rng(), 7);
        let before = controller.session();

        assert_eq!(block_on(controller.login("bob", "pw")), Err(AuthError::Network));
        assert_eq!(controller.session(), before);
        assert_eq!(notice(&controller), Notice::error(NETWORK_ERROR));
    }

    #[test]
    fn test_login_without_password_skips_network() {
        let controller = SessionController::new(MockApi::default(), RecordingRenderer::default(), winning_rng());
        assert_eq!(block_on(controller.login("bob", "")), Err(AuthError::MissingCredentials));
        assert_eq!(notice(&controller).text, MISSING_CREDENTIALS_ERROR);
        assert!(controller.api().calls().is_empty());
    }

    #[test]
    fn test_register_without_password_skips_network() {
        let controller = SessionController::new(MockApi::default(), RecordingRenderer::default(), winning_rng());
        controller.set_view(View::Register);
        assert_eq!(block_on(controller.register("bob", "")), Err(RegistrationError::MissingCredentials));
        assert_eq!(notice(&controller).text, MISSING_CREDENTIALS_ERROR);
        assert_eq!(controller.view(), View::Register);
        assert!(controller.api().calls().is_empty());
        assert!(controller.api().registrations.borrow().is_empty());
    }

    #[test]
    fn test_register_sends_starting_balance_and_returns_to_login() {
        let controller = SessionController::new(MockApi::default(), RecordingRenderer::default(), winning_rng());
        controller.set_view(View::Register);
        assert_eq!(block_on(controller.register("carol", "pw")), Ok(()));

        assert_eq!(
            controller.api().registrations.borrow()[0],
            RegisterRequest {
                player_id: "carol".to_string(),
                password: "pw".to_string(),
                name: "carol".to_string(),
                balance: INITIAL_BALANCE,
            }
        );
        assert_eq!(controller.view(), View::Login);
        assert!(!controller.session().is_logged_in);
        assert_eq!(notice(&controller), Notice::info(REGISTER_SUCCESS));
    }

    #[test]
    fn test_register_rejection_messages() {
        let api = MockApi {
            register: Err(ApiError::Rejected { status: 409, message: Some("Username already taken".to_string()) }),
            ..MockApi::default()
        };
        let controller = SessionController::new(api, RecordingRenderer::default(), winning_rng());
        controller.set_view(View::Register);
        block_on(controller.register("carol", "pw")).unwrap_err();
        assert_eq!(notice(&controller).text, "Registration failed: Username already taken");
        assert_eq!(controller.view(), View::Register);

        let api = MockApi {
            register: Err(ApiError::Rejected { status: 500, message: None }),
            ..MockApi::default()
        };
        let controller = SessionController::new(api, RecordingRenderer::default(), winning_rng());
        block_on(controller.register("carol", "pw")).unwrap_err();
        assert_eq!(notice(&controller).text, "Registration failed: Unknown error");
    }

    #[test]
    fn test_purchase_is_local_only() {
        let controller = controller(MockApi::default(), winning_rng(), 0);
        controller.purchase_credit();

        assert_eq!(controller.balance(), 10);
        assert!(controller.api().calls().is_empty());
        let frames = controller.renderer().frames.borrow();
        assert_eq!(frames.last().map(|f| f.session.balance), Some(10));
    }

    #[test]
    fn test_set_view_is_idempotent() {
        let controller = SessionController::new(MockApi::default(), RecordingRenderer::default(), winning_rng());
        controller.set_view(View::Register);
        controller.set_view(View::Register);
        assert_eq!(controller.view(), View::Register);
        controller.set_view(View::Login);
        assert_eq!(controller.view(), View::Login);
    }

    #[test]
    fn test_requests_rejected_while_one_is_in_flight() {
        let (release, gate) = oneshot::channel();
        let api = MockApi {
            gate: RefCell::new(Some(gate)),
            login: Ok(LoginResponse { player_id: None, balance: 9 }),
            ..MockApi::default()
        };
        let controller = controller(api, winning_rng(), 5);

        block_on(async {
            let mut first = Box::pin(controller.login("alice", "pw"));
            assert!(futures::poll!(first.as_mut()).is_pending());
            assert!(controller.is_busy());

            assert_eq!(controller.login("alice", "pw").await, Err(AuthError::Busy));
            assert_eq!(controller.register("alice", "pw").await, Err(RegistrationError::Busy));
            assert_eq!(controller.spin().await, Err(SpinError::Busy));
            assert_eq!(controller.balance(), 5);

            release.send(()).unwrap();
            assert_eq!(first.await, Ok(()));
        });

        assert!(!controller.is_busy());
        assert_eq!(controller.balance(), 9);
        assert_eq!(controller.api().calls(), vec!["login"]);
    }

    #[test]
    fn test_spin_rejected_while_win_is_settling() {
        let (release, gate) = oneshot::channel();
        let api = MockApi {
            gate: RefCell::new(Some(gate)),
            ..MockApi::default()
        };
        let controller = controller(api, winning_rng(), 5);

        block_on(async {
            let mut first = Box::pin(controller.spin());
            assert!(futures::poll!(first.as_mut()).is_pending());
            assert_eq!(controller.balance(), 5 - SPIN_COST);

            assert_eq!(controller.spin().await, Err(SpinError::Busy));
            assert_eq!(controller.balance(), 5 - SPIN_COST);

            release.send(()).unwrap();
            let report = first.await.unwrap();
            assert_eq!(report.transaction_id, Some(1));
            assert_eq!(report.settlement, Some(Ok(())));
        });

        assert_eq!(controller.balance(), 5 - SPIN_COST + WIN_AMOUNT);
        assert_eq!(controller.session().transaction_counter, Some(1));
        assert_eq!(controller.api().calls(), vec!["win"]);
    }

    #[test]
    fn test_every_change_is_rendered() {
        let controller = controller(MockApi::default(), losing_rng(), 2);
        block_on(controller.spin()).unwrap();

        let frames = controller.renderer().frames.borrow();
        let last = frames.last().unwrap();
        assert_eq!(last, &controller.state());
        // Charge, reels, notice.
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].session.balance, 1);
        assert!(frames[0].reels.is_none());
    }
}
