use rand::rngs::SmallRng;
use rand::SeedableRng;
use slots_shared::{HttpGameApi, SessionController, UiState, View};
use std::rc::Rc;
use yew::prelude::*;

use crate::components::auth::{LoginForm, RegisterForm};
use crate::components::{MessageBanner, SlotMachine};
use crate::config::api_base_url;
use crate::renderer::StateRenderer;
use crate::styles;

pub type Controller = SessionController<HttpGameApi, StateRenderer, SmallRng>;

/// Shared handle to the page's single controller. Equal only to itself.
#[derive(Clone)]
pub struct ControllerHandle(pub Rc<Controller>);

impl PartialEq for ControllerHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for ControllerHandle {
    type Target = Controller;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let ui = use_state(UiState::default);

    let controller = {
        let setter = ui.setter();
        use_memo((), move |_| {
            log::info!("Game server at {}", api_base_url());
            ControllerHandle(Rc::new(SessionController::new(
                HttpGameApi::new(api_base_url()),
                StateRenderer::new(setter),
                SmallRng::from_entropy(),
            )))
        })
    };
    let controller = (*controller).clone();

    let panel = match ui.view {
        View::Login => html! { <LoginForm controller={controller.clone()} /> },
        View::Register => html! { <RegisterForm controller={controller.clone()} /> },
        View::Game => html! {
            <SlotMachine
                controller={controller.clone()}
                session={ui.session.clone()}
                reels={ui.reels}
            />
        },
    };

    html! {
        <div class={styles::CONTAINER}>
            <div class={styles::CONTAINER_SM}>
                <div class={styles::CARD}>
                    <MessageBanner notice={ui.notice.clone()} />
                    { panel }
                </div>
            </div>
        </div>
    }
}
