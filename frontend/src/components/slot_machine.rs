use slots_shared::constants::{PURCHASE_AMOUNT, SPIN_COST, WHEEL_COUNT};
use slots_shared::session::Session;
use slots_shared::SpinOutcome;
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::app::ControllerHandle;
use crate::styles;

const BLANK_REEL: &str = "❔";

#[derive(Properties, PartialEq)]
pub struct SlotMachineProps {
    pub controller: ControllerHandle,
    pub session: Session,
    pub reels: Option<SpinOutcome>,
}

#[function_component(SlotMachine)]
pub fn slot_machine(props: &SlotMachineProps) -> Html {
    let is_spinning = use_state(|| false);

    let on_spin = {
        let controller = props.controller.clone();
        let is_spinning = is_spinning.clone();

        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            let is_spinning = is_spinning.clone();

            is_spinning.set(true);
            spawn_local(async move {
                match controller.spin().await {
                    Ok(report) => log::debug!("Spin finished: {:?}", report),
                    Err(e) => log::warn!("Spin refused: {}", e),
                }
                is_spinning.set(false);
            });
        })
    };

    let on_purchase = {
        let controller = props.controller.clone();
        Callback::from(move |_: MouseEvent| controller.purchase_credit())
    };

    let glyphs: [&str; WHEEL_COUNT] = props
        .reels
        .map(|outcome| outcome.glyphs())
        .unwrap_or([BLANK_REEL; WHEEL_COUNT]);

    html! {
        <div id="game-section">
            <div class="flex items-center justify-between mb-6">
                <h2 class={styles::TEXT_H2}>
                    {"Welcome, "}<span id="user-name">{ &props.session.username }</span>
                </h2>
                <div class={styles::BALANCE_BADGE}>
                    {"Balance: "}<span id="balance">{ props.session.balance.to_string() }</span>
                </div>
            </div>

            <div class={styles::REEL_ROW}>
                { for glyphs.iter().enumerate().map(|(index, glyph)| html! {
                    <div id={format!("wheel{}", index + 1)} class={styles::REEL}>{ *glyph }</div>
                }) }
            </div>

            <div class="mt-8 flex flex-col sm:flex-row gap-4 justify-center">
                <button
                    id="spin"
                    class={styles::BUTTON_PRIMARY}
                    onclick={on_spin}
                    disabled={*is_spinning}
                >
                    { if *is_spinning { "Spinning...".to_string() } else { format!("Spin ({} credit)", SPIN_COST) } }
                </button>
                <button id="purchase-balance" class={styles::BUTTON_SECONDARY} onclick={on_purchase}>
                    { format!("Buy {} credits", PURCHASE_AMOUNT) }
                </button>
            </div>
        </div>
    }
}
