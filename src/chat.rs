use crate::constants::CHAT_ENDPOINT_PATH;
use crate::dom;
use crate::storage;
use futures_util::future::{select, Either};
use futures_util::pin_mut;
use instant::Instant;
use starfield_core::chat::{
    extract_keywords, fallback_response, keyword_events, local_response, ChatRequest,
    ChatResponse, Conversation, Role,
};
use starfield_core::constants::CHAT_TIMEOUT;
use starfield_core::prefs::InteractionBundle;
use starfield_core::{Error, FieldEventSender};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Everything a chat round trip touches besides the network.
pub struct ChatSession {
    pub conversation: Conversation,
    pub bundle: InteractionBundle,
    pub events: FieldEventSender,
    pub started: Instant,
}

pub type SharedSession = Rc<RefCell<ChatSession>>;

fn endpoint() -> starfield_core::Result<String> {
    let origin = web::window()
        .ok_or_else(|| Error::Transport("no window".into()))?
        .location()
        .origin()
        .map_err(|e| Error::Transport(format!("{:?}", e)))?;
    Ok(format!("{}{}", origin, CHAT_ENDPOINT_PATH))
}

async fn post(request: &ChatRequest) -> starfield_core::Result<ChatResponse> {
    let url = endpoint()?;
    let res = reqwest::Client::new()
        .post(url)
        .json(request)
        .send()
        .await
        .map_err(|e| Error::Transport(e.to_string()))?;
    let status = res.status();
    if !status.is_success() {
        return Err(Error::Http {
            status: status.as_u16(),
        });
    }
    let body = res
        .text()
        .await
        .map_err(|e| Error::Transport(e.to_string()))?;
    ChatResponse::from_json(&body)
}

/// Resolves after `after`; used to race the request.
async fn sleep(after: Duration) {
    let ms = after.as_millis().min(i32::MAX as u128) as i32;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(w) = web::window() {
            _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    _ = JsFuture::from(promise).await;
}

async fn post_with_timeout(request: &ChatRequest) -> starfield_core::Result<ChatResponse> {
    let call = post(request);
    let timer = sleep(CHAT_TIMEOUT);
    pin_mut!(call);
    pin_mut!(timer);
    match select(call, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(Error::Timeout),
    }
}

/// Send `message`, return the text to show, and push any keyword effects
/// into the field. Never fails: errors turn into a canned or offline answer.
pub async fn ask(session: SharedSession, message: String) -> String {
    let (request, visits, time_on_site) = {
        let mut s = session.borrow_mut();
        let time_on_site = s.started.elapsed().as_secs();
        match s.conversation.request(&message, time_on_site) {
            Ok(r) => (r, s.bundle.visits, time_on_site),
            Err(e) => {
                log::debug!("[chat] {}", e);
                return String::new();
            }
        }
    };

    let reply = match post_with_timeout(&request).await {
        Ok(res) if res.success => {
            let hits = if res.keywords.is_empty() {
                extract_keywords(&res.response)
            } else {
                res.keywords
            };
            if res.fallback {
                log::info!("[chat] endpoint answered with a fallback");
            }
            Some((res.response, hits))
        }
        Ok(_) => {
            log::warn!("[chat] endpoint reported failure");
            None
        }
        Err(e @ (Error::Timeout | Error::Transport(_))) => {
            log::warn!("[chat] {}, answering offline", e);
            let hour = js_sys::Date::new_0().get_hours();
            let text = local_response(&request.message, hour, visits, time_on_site);
            let hits = extract_keywords(&text);
            Some((text, hits))
        }
        Err(e) => {
            log::warn!("[chat] {}", e);
            None
        }
    };
    let (text, hits) =
        reply.unwrap_or_else(|| (fallback_response(&mut rand::thread_rng()).to_string(), Vec::new()));

    let mut s = session.borrow_mut();
    if let Some(doc) = dom::window_document() {
        let events = keyword_events(&hits, |section| dom::element_center(&doc, section.element_id()));
        s.events.send_all(events);
    }
    s.conversation.push(Role::Assistant, text.clone());
    s.bundle.record_message();
    storage::save_bundle(&s.bundle);
    text
}

