use leptos::prelude::*;

/// Radio button whose checked and disabled state follow signals
#[component]
pub fn Radio(
    /// Label text
    #[prop(into)]
    label: String,
    /// Radio value
    #[prop(into)]
    value: String,
    /// Name attribute (for grouping)
    #[prop(into)]
    name: String,
    /// ID for the radio element
    #[prop(into)]
    id: String,
    #[prop(into)]
    checked: Signal<bool>,
    #[prop(into)]
    disabled: Signal<bool>,
    /// Change event handler, receives `value`
    on_change: Callback<String>,
) -> impl IntoView {
    let label_for = id.clone();
    let value_for_change = value.clone();
    let wrapper_class = move || {
        if disabled.get() {
            "form__radio-wrapper form__radio-wrapper--disabled"
        } else {
            "form__radio-wrapper"
        }
    };

    view! {
        <div class=wrapper_class>
            <input
                id=id
                type="radio"
                class="form__radio"
                name=name
                value=value
                prop:checked=move || checked.get()
                disabled=move || disabled.get()
                on:change=move |_| on_change.run(value_for_change.clone())
            />
            <label class="form__radio-label" for=label_for>
                {label}
            </label>
        </div>
    }
}
