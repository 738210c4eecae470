pub mod auth;
pub mod message_banner;
pub mod slot_machine;

pub use message_banner::MessageBanner;
pub use slot_machine::SlotMachine;

use web_sys::HtmlInputElement;
use yew::NodeRef;

/// Current text of an `<input>` behind `node`, empty when it is not mounted.
pub fn input_value(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}
