use leptos::prelude::*;

fn control_class(invalid: bool) -> &'static str {
    if invalid {
        "form-control is-invalid"
    } else {
        "form-control"
    }
}

/// Text input with label, required flag and invalid decoration
#[component]
pub fn Input(
    /// Label text
    #[prop(into)]
    label: String,
    /// Element id (also used as `name`)
    #[prop(into)]
    id: String,
    /// Input value
    #[prop(into)]
    value: Signal<String>,
    /// Input event handler
    #[prop(optional)]
    on_input: Option<Callback<String>>,
    /// Blur event handler
    #[prop(optional)]
    on_blur: Option<Callback<()>>,
    /// Required attribute (reactive)
    #[prop(into)]
    required: Signal<bool>,
    /// Invalid decoration (reactive)
    #[prop(into)]
    invalid: Signal<bool>,
    /// Message shown under the field while invalid
    #[prop(optional, into)]
    feedback: MaybeProp<String>,
    /// Input type: "text" (default), "tel", "email", etc.
    #[prop(optional, into)]
    input_type: MaybeProp<String>,
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    #[prop(optional, into)]
    autocomplete: MaybeProp<String>,
) -> impl IntoView {
    let input_t = move || input_type.get().unwrap_or_else(|| "text".to_string());
    let name = id.clone();
    let label_for = id.clone();

    view! {
        <div class="form__group">
            <label class="form__label" for=label_for>
                {label}
            </label>
            <input
                id=id
                name=name
                class=move || control_class(invalid.get())
                type=input_t
                prop:value=move || value.get()
                placeholder=move || placeholder.get().unwrap_or_default()
                autocomplete=move || autocomplete.get().unwrap_or_default()
                required=move || required.get()
                on:input=move |ev| {
                    if let Some(handler) = on_input {
                        handler.run(event_target_value(&ev));
                    }
                }
                on:blur=move |_| {
                    if let Some(handler) = on_blur {
                        handler.run(());
                    }
                }
            />
            <Show when=move || invalid.get()>
                <div class="invalid-feedback">
                    {move || feedback.get().unwrap_or_else(|| "This field is required.".to_string())}
                </div>
            </Show>
        </div>
    }
}

/// Multi-line variant of [`Input`]; never required
#[component]
pub fn Textarea(
    #[prop(into)]
    label: String,
    #[prop(into)]
    id: String,
    #[prop(into)]
    value: Signal<String>,
    #[prop(optional)]
    on_input: Option<Callback<String>>,
    #[prop(default = 3)]
    rows: u32,
) -> impl IntoView {
    let name = id.clone();
    let label_for = id.clone();

    view! {
        <div class="form__group">
            <label class="form__label" for=label_for>
                {label}
            </label>
            <textarea
                id=id
                name=name
                class="form-control"
                rows=rows
                prop:value=move || value.get()
                on:input=move |ev| {
                    if let Some(handler) = on_input {
                        handler.run(event_target_value(&ev));
                    }
                }
            />
        </div>
    }
}
