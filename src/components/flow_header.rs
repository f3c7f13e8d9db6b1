//! Editor header: bot selector and save button.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement, HtmlSelectElement, MouseEvent};

use crate::messages::Message;
use crate::models::{Bot, BotStatus};
use crate::state::{dispatch_global_message, AppState};

pub const BOT_SELECT_ID: &str = "bot-select";
pub const SAVE_BUTTON_ID: &str = "save-flow";
const BOTS_ATTR: &str = "data-bots";

pub fn render(document: &Document, parent: &Element) -> Result<(), JsValue> {
    let header = document.create_element("header")?;
    header.set_id("flow-header");
    header.set_class_name("flow-header");

    let title = document.create_element("h1")?;
    title.set_text_content(Some("Flow Editor"));
    header.append_child(&title)?;

    let select = document
        .create_element("select")?
        .dyn_into::<HtmlSelectElement>()?;
    select.set_id(BOT_SELECT_ID);
    select.set_attribute("aria-label", "Bot")?;
    let cb = Closure::wrap(Box::new(move |e: Event| {
        if let Some(sel) = e.target().and_then(|t| t.dyn_into::<HtmlSelectElement>().ok()) {
            let bot_id = sel.value();
            if !bot_id.is_empty() {
                dispatch_global_message(Message::SelectBot(bot_id));
            }
        }
    }) as Box<dyn FnMut(_)>);
    select.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())?;
    cb.forget();
    header.append_child(&select)?;

    let save = document.create_element("button")?;
    save.set_id(SAVE_BUTTON_ID);
    save.set_class_name("btn-primary");
    save.set_attribute("type", "button")?;
    save.set_text_content(Some("Save flow"));
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::SaveGraph);
    }) as Box<dyn FnMut(_)>);
    save.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    header.append_child(&save)?;

    parent.append_child(&header)?;
    Ok(())
}

/// Option text for the selector, e.g. `Atendimento Geral (paused)`.
pub fn bot_option_text(bot: &Bot) -> String {
    let status = match bot.status {
        BotStatus::Online => "online",
        BotStatus::Offline => "offline",
        BotStatus::Paused => "paused",
    };
    format!("{} ({})", bot.name, status)
}

pub fn refresh(document: &Document, state: &AppState) -> Result<(), JsValue> {
    if let Some(select) = document
        .get_element_by_id(BOT_SELECT_ID)
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
    {
        let signature = state
            .bots
            .iter()
            .map(|b| format!("{}:{}", b.id, bot_option_text(b)))
            .collect::<Vec<_>>()
            .join("|");
        if select.get_attribute(BOTS_ATTR).as_deref() != Some(signature.as_str()) {
            select.set_inner_html("");
            for bot in &state.bots {
                let option = document.create_element("option")?;
                option.set_attribute("value", &bot.id)?;
                option.set_text_content(Some(&bot_option_text(bot)));
                select.append_child(&option)?;
            }
            select.set_attribute(BOTS_ATTR, &signature)?;
        }
        select.set_value(state.selected_bot_id.as_deref().unwrap_or(""));
        select.set_disabled(state.bots.is_empty());
    }

    if let Some(bot) = state.selected_bot() {
        document.set_title(&format!("{} · Flow editor", bot.name));
    }

    if let Some(save) = document
        .get_element_by_id(SAVE_BUTTON_ID)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        let busy = state.is_loading || state.is_saving || state.selected_bot_id.is_none();
        if busy {
            save.set_attribute("disabled", "")?;
        } else {
            save.remove_attribute("disabled")?;
        }
        let text = if state.is_saving { "Saving..." } else { "Save flow" };
        save.set_text_content(Some(text));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MockDb;

    #[test]
    fn option_text_includes_status() {
        let db = MockDb::seed();
        assert_eq!(bot_option_text(&db.bots[0]), "Atendimento Geral (online)");
        assert_eq!(bot_option_text(&db.bots[1]), "Recuperação de Carrinho (paused)");
    }
}
