use leptos::prelude::*;

/// Submit-style button with variants (primary, success, secondary) and a busy state
#[component]
pub fn Button(
    /// Button variant: "primary" (default), "success" or "secondary"
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    /// Button type attribute: "button" (default) or "submit"
    #[prop(optional, into)]
    button_type: MaybeProp<String>,
    #[prop(optional, into)]
    id: MaybeProp<String>,
    /// Disabled state (reactive)
    #[prop(into)]
    disabled: Signal<bool>,
    /// Shows "Sending…" instead of children (reactive)
    #[prop(into)]
    busy: Signal<bool>,
    /// Idle label
    children: ChildrenFn,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("primary") {
        "success" => "btn-success",
        "secondary" => "btn-secondary",
        _ => "btn-primary",
    };
    let btn_type = move || button_type.get().unwrap_or_else(|| "button".to_string());
    let is_busy = move || busy.get();

    view! {
        <button
            id=move || id.get()
            type=btn_type
            class=move || format!("btn {}", variant_class())
            disabled=move || disabled.get()
        >
            <Show when=is_busy fallback=move || children()>
                "Sending…"
            </Show>
        </button>
    }
}
