use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Overlay with a centered surface. Popups render their own header inside.
#[component]
pub fn ModalFrame(
    /// Overlay click or host-initiated close
    on_close: Callback<()>,
    /// Extra style for the surface (`div.modal`)
    #[prop(optional)]
    modal_style: Option<String>,
    children: Children,
) -> impl IntoView {
    // Press and release must both land on the overlay itself, so a text
    // selection dragged out of a field does not close the popup
    let pressed_on_overlay = RwSignal::new(false);
    let on_overlay = |ev: &ev::MouseEvent| match (ev.target(), ev.current_target()) {
        (Some(target), Some(current)) => target == current,
        _ => false,
    };

    let handle_mouse_down = move |ev: ev::MouseEvent| pressed_on_overlay.set(on_overlay(&ev));
    let handle_click = move |ev: ev::MouseEvent| {
        let close = pressed_on_overlay.get_untracked() && on_overlay(&ev);
        pressed_on_overlay.set(false);
        if close {
            // Next tick: the overlay must not be removed during its own click dispatch
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    let surface_style = format!("position: relative; {}", modal_style.unwrap_or_default());

    view! {
        <div class="modal-overlay" style="z-index: 1000;" on:mousedown=handle_mouse_down on:click=handle_click>
            <div class="modal" style=surface_style on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                {children()}
            </div>
        </div>
    }
}
