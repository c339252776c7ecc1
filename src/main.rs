//! Main module for the pace-to-splits calculator using Yew.
//! Wires form state, debounced recomputation, and side-effect logic.

use gloo_timers::callback::Timeout;
use pace_splits::{compute_splits, SplitTable};
use web_sys::HtmlInputElement;
use yew::prelude::*;

mod components;
mod config;

use components::{render_splits, DistancePills};
use config::*;

/// Create a debounced callback that cancels any previous pending call
fn debounce_callback<T: 'static>(
    timer_handle: &UseStateHandle<Option<Timeout>>,
    callback: Callback<T>,
    value: T,
    delay_ms: u32,
) {
    // Cancel any existing timer by replacing it
    timer_handle.set(None);

    // Set new timer
    let timer_handle_clone = timer_handle.clone();
    let handle = Timeout::new(delay_ms, move || {
        callback.emit(value);
        // Clear the handle after execution
        timer_handle_clone.set(None);
    });
    timer_handle.set(Some(handle));
}

/// Scroll the results table into view after an explicit calculate click.
/// Deferred one tick so the freshly set table has rendered first.
fn scroll_results_into_view() {
    Timeout::new(0, || {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(RESULTS_ELEMENT_ID))
        {
            el.scroll_into_view();
        }
    })
    .forget();
}

/// Primary application component wiring state, effects, and UI elements.
#[function_component(App)]
fn app() -> Html {
    let pace_text = use_state(|| DEFAULT_PACE_TEXT.to_string());
    let reference_text = use_state(|| DEFAULT_REFERENCE_KM_TEXT.to_string());
    let distances_text = use_state(|| DEFAULT_DISTANCES_TEXT.to_string());
    let splits = use_state(SplitTable::new);
    let error_message = use_state(|| None::<String>);
    // Debounce timer handle for reactive recomputation
    let debounce_timer = use_state(|| None::<Timeout>);

    // Recompute splits from the current field text. The `scroll` flag is set
    // only by the explicit Calculate button and never affects the math.
    let calculate = {
        let pace_text = pace_text.clone();
        let reference_text = reference_text.clone();
        let distances_text = distances_text.clone();
        let splits = splits.clone();
        let error_message = error_message.clone();
        Callback::from(move |scroll: bool| {
            match compute_splits(&pace_text, &reference_text, &distances_text) {
                Ok(table) => {
                    splits.set(table);
                    error_message.set(None);
                    if scroll {
                        scroll_results_into_view();
                    }
                }
                Err(err) => {
                    // Keep the previous table on screen; clearing it would
                    // flash rows away while the user is mid-edit elsewhere.
                    error_message.set(Some(err.to_string()));
                }
            }
        })
    };

    // Debounced recomputation: any edit schedules a deferred recalculation,
    // superseding whatever was pending. Also runs once on mount to fill the
    // table from the default field values.
    {
        let calculate = calculate.clone();
        let debounce_timer = debounce_timer.clone();
        use_effect_with(
            (
                (*pace_text).clone(),
                (*reference_text).clone(),
                (*distances_text).clone(),
            ),
            move |_| {
                debounce_callback(&debounce_timer, calculate, false, DEBOUNCE_MS);
                || ()
            },
        );
    }

    // --- Input handlers ---
    let pace_oninput = {
        let pace_text = pace_text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            pace_text.set(input.value());
        })
    };
    let reference_oninput = {
        let reference_text = reference_text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            reference_text.set(input.value());
        })
    };
    let distances_onchange = {
        let distances_text = distances_text.clone();
        Callback::from(move |text: String| {
            distances_text.set(text);
        })
    };
    let calculate_onclick = {
        let calculate = calculate.clone();
        Callback::from(move |_: MouseEvent| calculate.emit(true))
    };

    html! {
        <div class="container">
            <h1>{ "Pace to Splits Calculator" }</h1>

            <div class="form-group">
                <label for="pace_time_input">{ "Pace Time (mm:ss):" }</label>
                <input
                    type="text"
                    id="pace_time_input"
                    value={(*pace_text).clone()}
                    placeholder="e.g., 5:30"
                    oninput={pace_oninput}
                />
            </div>

            <div class="form-group">
                <label for="pace_distance_input">{ "Pace Distance (km):" }</label>
                <input
                    type="number"
                    id="pace_distance_input"
                    min="0"
                    step="any"
                    value={(*reference_text).clone()}
                    placeholder="e.g., 1"
                    oninput={reference_oninput}
                />
            </div>

            <div class="form-group">
                <label>{ "Custom Distances (comma-separated, e.g., 400m, 1k, 5k):" }</label>
                <DistancePills
                    text={(*distances_text).clone()}
                    on_change={distances_onchange}
                />
            </div>

            <button class="calculate-button" onclick={calculate_onclick}>
                { "Calculate Splits" }
            </button>

            if let Some(ref message) = *error_message {
                <div class="input-error">{ message }</div>
            }

            { render_splits(&splits) }
        </div>
    }
}

/// Entry point: initializes Yew renderer for the App component.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
