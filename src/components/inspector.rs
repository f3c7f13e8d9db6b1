//! Side panel that edits the selected node.
//!
//! The form is rebuilt only when the selected node changes, so typing into
//! a field never loses focus to a re-render.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlInputElement, HtmlTextAreaElement, MouseEvent};

use crate::messages::Message;
use crate::models::{FlowNode, NodeField};
use crate::state::dispatch_global_message;

pub const INSPECTOR_ID: &str = "inspector";
const NODE_ATTR: &str = "data-node-id";

pub fn render(document: &Document, parent: &Element) -> Result<(), JsValue> {
    let panel = document.create_element("aside")?;
    panel.set_id(INSPECTOR_ID);
    panel.set_class_name("inspector");
    parent.append_child(&panel)?;
    render_placeholder(document, &panel)
}

pub fn refresh(document: &Document, selected: Option<&FlowNode>) -> Result<(), JsValue> {
    let Some(panel) = document.get_element_by_id(INSPECTOR_ID) else {
        return Ok(());
    };
    let shown = panel.get_attribute(NODE_ATTR).unwrap_or_default();
    match selected {
        Some(node) if node.id == shown => Ok(()),
        Some(node) => render_form(document, &panel, node),
        None if shown.is_empty() => Ok(()),
        None => render_placeholder(document, &panel),
    }
}

fn render_placeholder(document: &Document, panel: &Element) -> Result<(), JsValue> {
    panel.set_inner_html("");
    panel.set_attribute(NODE_ATTR, "")?;
    let hint = document.create_element("p")?;
    hint.set_class_name("inspector-empty");
    hint.set_text_content(Some("Select a step on the canvas to edit it."));
    panel.append_child(&hint)?;
    Ok(())
}

fn render_form(document: &Document, panel: &Element, node: &FlowNode) -> Result<(), JsValue> {
    panel.set_inner_html("");
    panel.set_attribute(NODE_ATTR, &node.id)?;

    let title = document.create_element("h3")?;
    title.set_text_content(Some("Edit step"));
    panel.append_child(&title)?;

    append_text_input(document, panel, node, NodeField::Label, "Label", "")?;
    append_text_input(
        document,
        panel,
        node,
        NodeField::Trigger,
        "Trigger",
        "Words that activate this step (empty = default path)",
    )?;

    let content_label = document.create_element("label")?;
    content_label.set_text_content(Some("Content"));
    content_label.set_attribute("for", "inspector-content")?;
    panel.append_child(&content_label)?;

    let textarea = document
        .create_element("textarea")?
        .dyn_into::<HtmlTextAreaElement>()?;
    textarea.set_id("inspector-content");
    textarea.set_rows(6);
    textarea.set_value(&node.content);
    textarea.set_placeholder("What the bot says at this step");
    let node_id = node.id.clone();
    let cb = Closure::wrap(Box::new(move |e: Event| {
        if let Some(target) = e.target().and_then(|t| t.dyn_into::<HtmlTextAreaElement>().ok()) {
            dispatch_global_message(Message::UpdateField {
                node_id: node_id.clone(),
                field: NodeField::Content,
                value: target.value(),
            });
        }
    }) as Box<dyn FnMut(_)>);
    textarea.add_event_listener_with_callback("input", cb.as_ref().unchecked_ref())?;
    cb.forget();
    panel.append_child(&textarea)?;

    let id_line = document.create_element("p")?;
    id_line.set_class_name("inspector-id");
    id_line.set_text_content(Some(&format!("ID: {}", node.id)));
    panel.append_child(&id_line)?;

    let delete = document.create_element("button")?;
    delete.set_id("inspector-delete");
    delete.set_class_name("btn-danger");
    delete.set_attribute("type", "button")?;
    delete.set_text_content(Some("Delete step"));
    let node_id = node.id.clone();
    let cb = Closure::wrap(Box::new(move |_e: MouseEvent| {
        dispatch_global_message(Message::RequestDeleteNode(node_id.clone()));
    }) as Box<dyn FnMut(_)>);
    delete.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    panel.append_child(&delete)?;

    Ok(())
}

fn append_text_input(
    document: &Document,
    panel: &Element,
    node: &FlowNode,
    field: NodeField,
    caption: &str,
    placeholder: &str,
) -> Result<(), JsValue> {
    let id = match field {
        NodeField::Label => "inspector-label",
        NodeField::Trigger => "inspector-trigger",
        NodeField::Content => "inspector-content",
    };

    let label = document.create_element("label")?;
    label.set_text_content(Some(caption));
    label.set_attribute("for", id)?;
    panel.append_child(&label)?;

    let input = document
        .create_element("input")?
        .dyn_into::<HtmlInputElement>()?;
    input.set_id(id);
    input.set_type("text");
    input.set_value(node.field(field));
    input.set_placeholder(placeholder);

    let node_id = node.id.clone();
    let cb = Closure::wrap(Box::new(move |e: Event| {
        if let Some(target) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
            dispatch_global_message(Message::UpdateField {
                node_id: node_id.clone(),
                field,
                value: target.value(),
            });
        }
    }) as Box<dyn FnMut(_)>);
    input.add_event_listener_with_callback("input", cb.as_ref().unchecked_ref())?;
    cb.forget();
    panel.append_child(&input)?;
    Ok(())
}
