//! Pure Yew view components for the splits calculator UI.
//!
//! This module contains stateless pieces that render based on props: the
//! results table and the editable distance pill list.

use pace_splits::{parse_distance_list, serialize_distance_list, SplitTable};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config::RESULTS_ELEMENT_ID;

/// Renders the table with all projected splits, one row per valid distance
/// token in input order. Nothing is rendered while the table is empty.
pub fn render_splits(splits: &SplitTable) -> Html {
    if splits.is_empty() {
        return html! {};
    }

    html! {
        <div class="results" id={RESULTS_ELEMENT_ID}>
            <h2>{ "Splits" }</h2>
            <table class="splits-table">
                <thead>
                    <tr>
                        <th>{ "Distance" }</th>
                        <th>{ "Time" }</th>
                    </tr>
                </thead>
                <tbody>
                    { splits.iter().map(|(label, time)| {
                        html! {
                            <tr key={label.clone()}>
                                <td>{ label }</td>
                                <td>{ time }</td>
                            </tr>
                        }
                    }).collect::<Html>() }
                </tbody>
            </table>
        </div>
    }
}

/// Drop the `index`-th valid token from the raw distances text. Indices
/// follow the parsed chip order, so duplicate labels stay independent and
/// only the clicked occurrence disappears.
fn remove_distance_at(text: &str, index: usize) -> String {
    let kept: Vec<_> = parse_distance_list(text)
        .into_iter()
        .enumerate()
        .filter_map(|(i, d)| (i != index).then_some(d))
        .collect();
    serialize_distance_list(&kept)
}

/// Props for the editable distance pill list.
#[derive(Properties, PartialEq)]
pub struct DistancePillsProps {
    /// Raw comma-separated distances text owned by the parent.
    pub text: String,
    /// Emitted with the new raw text whenever a chip is removed or the
    /// free-text editor changes.
    pub on_change: Callback<String>,
}

/// Editable pill list over the comma-separated distances field.
///
/// Chips are derived from the raw text through the core's parse/serialize
/// pair; removing a chip re-serializes the remaining tokens. A toggle
/// switches into raw-text editing for bulk changes.
#[function_component(DistancePills)]
pub fn distance_pills(props: &DistancePillsProps) -> Html {
    let editing = use_state(|| false);

    let toggle_editing = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(!*editing))
    };

    if *editing {
        let oninput = {
            let on_change = props.on_change.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                on_change.emit(input.value());
            })
        };
        return html! {
            <div class="pill-editor">
                <input
                    type="text"
                    class="pill-input"
                    value={props.text.clone()}
                    {oninput}
                />
                <button type="button" class="pill-toggle" onclick={toggle_editing}>
                    { "Done" }
                </button>
            </div>
        };
    }

    let distances = parse_distance_list(&props.text);
    html! {
        <div class="pill-list">
            { distances.iter().enumerate().map(|(index, distance)| {
                let label = distance.label.clone();
                let remove = {
                    let on_change = props.on_change.clone();
                    let text = props.text.clone();
                    Callback::from(move |_: MouseEvent| {
                        on_change.emit(remove_distance_at(&text, index));
                    })
                };
                html! {
                    <span class="pill" key={format!("{index}-{label}")}>
                        { label.clone() }
                        <button type="button" class="pill-remove" onclick={remove}>
                            { "\u{00d7}" }
                        </button>
                    </span>
                }
            }).collect::<Html>() }
            <button type="button" class="pill-toggle" onclick={toggle_editing}>
                { "Edit" }
            </button>
        </div>
    }
}
