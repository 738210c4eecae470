use slots_shared::View;
use wasm_bindgen_futures::spawn_local;
use web_sys::{MouseEvent, SubmitEvent};
use yew::prelude::*;

use crate::app::ControllerHandle;
use crate::components::input_value;
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct LoginFormProps {
    pub controller: ControllerHandle,
}

#[function_component(LoginForm)]
pub fn login_form(props: &LoginFormProps) -> Html {
    let username_ref = use_node_ref();
    let password_ref = use_node_ref();
    let loading = use_state(|| false);

    let onsubmit = {
        let controller = props.controller.clone();
        let username_ref = username_ref.clone();
        let password_ref = password_ref.clone();
        let loading = loading.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if *loading {
                return;
            }

            let username = input_value(&username_ref);
            let password = input_value(&password_ref);
            let controller = controller.clone();
            let loading = loading.clone();

            loading.set(true);
            spawn_local(async move {
                if let Err(e) = controller.login(&username, &password).await {
                    log::warn!("Login failed: {}", e);
                }
                loading.set(false);
            });
        })
    };

    let show_register = {
        let controller = props.controller.clone();
        Callback::from(move |_: MouseEvent| controller.set_view(View::Register))
    };

    html! {
        <div id="login-section">
            <div class={styles::AUTH_HEADER}>
                <h2 class={styles::TEXT_H2}>{"Log In"}</h2>
            </div>
            <form id="login-form" class={styles::FORM} {onsubmit}>
                <div>
                    <label for="username" class={styles::TEXT_LABEL}>{"Username"}</label>
                    <input id="username" type="text" class={styles::INPUT} ref={username_ref} />
                </div>
                <div>
                    <label for="password" class={styles::TEXT_LABEL}>{"Password"}</label>
                    <input id="password" type="password" class={styles::INPUT} ref={password_ref} />
                </div>
                <button type="submit" class={styles::AUTH_BUTTON} disabled={*loading}>
                    { if *loading { "Logging in..." } else { "Log In" } }
                </button>
            </form>
            <p class={classes!(styles::TEXT_SECONDARY, "mt-4", "text-center")}>
                {"Don't have an account? "}
                <button id="show-register" type="button" class={styles::LINK} onclick={show_register}>
                    {"Register"}
                </button>
            </p>
        </div>
    }
}
