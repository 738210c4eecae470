use slots_shared::View;
use wasm_bindgen_futures::spawn_local;
use web_sys::{MouseEvent, SubmitEvent};
use yew::prelude::*;

use crate::app::ControllerHandle;
use crate::components::input_value;
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct RegisterFormProps {
    pub controller: ControllerHandle,
}

#[function_component(RegisterForm)]
pub fn register_form(props: &RegisterFormProps) -> Html {
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
                if let Err(e) = controller.register(&username, &password).await {
                    log::warn!("Registration failed: {}", e);
                }
                loading.set(false);
            });
        })
    };

    let show_login = {
        let controller = props.controller.clone();
        Callback::from(move |_: MouseEvent| controller.set_view(View::Login))
    };

    html! {
        <div id="register-section">
            <div class={styles::AUTH_HEADER}>
                <h2 class={styles::TEXT_H2}>{"Create an Account"}</h2>
                <p class={styles::TEXT_SMALL}>{"New players start with 100 credits"}</p>
            </div>
            <form id="register-form" class={styles::FORM} {onsubmit}>
                <div>
                    <label for="new-username" class={styles::TEXT_LABEL}>{"Username"}</label>
                    <input id="new-username" type="text" class={styles::INPUT} ref={username_ref} />
                </div>
                <div>
                    <label for="new-password" class={styles::TEXT_LABEL}>{"Password"}</label>
                    <input id="new-password" type="password" class={styles::INPUT} ref={password_ref} />
                </div>
                <button type="submit" class={styles::AUTH_BUTTON} disabled={*loading}>
                    { if *loading { "Registering..." } else { "Register" } }
                </button>
            </form>
            <p class={classes!(styles::TEXT_SECONDARY, "mt-4", "text-center")}>
                {"Already have an account? "}
                <button id="show-login" type="button" class={styles::LINK} onclick={show_login}>
                    {"Login"}
                </button>
            </p>
        </div>
    }
}
