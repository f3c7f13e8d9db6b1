use crate::messages::{Command, Message};
use crate::network::gateway;
use crate::state::dispatch_global_message;

/// Runs a gateway command in the background and reports the result as a
/// message.
pub fn execute_gateway_command(cmd: Command) {
    match cmd {
        Command::FetchBots => {
            wasm_bindgen_futures::spawn_local(async move {
                match gateway::list_bots().await {
                    Ok(fetched) => {
                        debug_log!("Fetched {} bots", fetched.data.len());
                        let offline = fetched.is_offline();
                        dispatch_global_message(Message::BotsLoaded {
                            bots: fetched.data,
                            offline,
                        })
                    }
                    Err(e) => {
                        error_log!("Failed to fetch bots: {}", e);
                        dispatch_global_message(Message::BotsLoadFailed(e.to_string()))
                    }
                }
            });
        }
        Command::FetchGraph { bot_id } => {
            wasm_bindgen_futures::spawn_local(async move {
                match gateway::load_graph(&bot_id).await {
                    Ok(fetched) => {
                        let offline = fetched.is_offline();
                        dispatch_global_message(Message::GraphLoaded {
                            bot_id,
                            nodes: fetched.data,
                            offline,
                        })
                    }
                    Err(e) => {
                        error_log!("Failed to fetch flow for {}: {}", bot_id, e);
                        dispatch_global_message(Message::GraphLoadFailed {
                            bot_id,
                            error: e.to_string(),
                        })
                    }
                }
            });
        }
        Command::SaveGraph { bot_id, nodes } => {
            wasm_bindgen_futures::spawn_local(async move {
                match gateway::save_graph(&bot_id, &nodes).await {
                    Ok(fetched) => dispatch_global_message(Message::GraphSaved {
                        bot_id,
                        offline: fetched.is_offline(),
                    }),
                    Err(e) => {
                        error_log!("Failed to save flow for {}: {}", bot_id, e);
                        dispatch_global_message(Message::GraphSaveFailed {
                            bot_id,
                            error: e.to_string(),
                        })
                    }
                }
            });
        }
        other => error_log!("Not a gateway command: {:?}", other),
    }
}
