use super::view_model::RsvpFormViewModel;
use crate::layout::page_context::use_page_context;
use crate::shared::components::ui::{Button, Input, Radio, Textarea};
use contracts::domain::a001_guest_list::GateState;
use contracts::domain::a002_rsvp::phone::PHONE_HINT;
use contracts::domain::a002_rsvp::{FieldId, FormSection};
use contracts::enums::AttendanceMode;
use leptos::prelude::*;

/// Gate feedback under the child name field
#[component]
fn AccessStatus(vm: RsvpFormViewModel) -> impl IntoView {
    let contact = vm.contact_anchor();
    let name = move || vm.session.with(|s| s.gate_name.clone());

    view! {
        <div id="accessStatus" role="status" aria-live="polite">
            {move || match vm.gate() {
                GateState::Unknown if vm.is_checking.get() => view! {
                    <div class="form__hint">"Checking the guest list…"</div>
                }
                .into_any(),
                GateState::Unknown => ().into_any(),
                GateState::Granted => view! {
                    <div class="alert alert-success">
                        "🟢 " <strong>"Access Granted."</strong> " Welcome, agent "
                        <strong>{name}</strong> "."
                    </div>
                }
                .into_any(),
                GateState::Denied => view! {
                    <div class="alert alert-danger">
                        "🔴 " <strong>"Access Denied."</strong> " We can’t find "
                        <strong>{name}</strong> " on the list."
                        <br />
                        <a class="link-light fw-semibold" href=contact.clone()>"Contact us"</a>
                        " if you think this is an error."
                    </div>
                }
                .into_any(),
                GateState::Error => view! {
                    <div class="alert alert-warning">
                        "⚠️ " <strong>"Access check unavailable."</strong>
                        " We couldn’t load the guest list. Please try again in a moment."
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}

#[component]
fn AttendanceChoice(vm: RsvpFormViewModel) -> impl IntoView {
    let disabled = Signal::derive(move || !vm.radios_enabled());
    let on_change = Callback::new(move |code: String| vm.on_mode_change(code));

    view! {
        <fieldset class=move || if vm.radios_enabled() { "form__group" } else { "form__group d-none" }>
            <legend class="form__label">"Will your agent be attending?"</legend>
            <Radio
                id="attYes"
                name="attending"
                value=AttendanceMode::Yes.code()
                label=AttendanceMode::Yes.display_name()
                checked=Signal::derive(move || vm.mode() == AttendanceMode::Yes)
                disabled=disabled
                on_change=on_change
            />
            <Radio
                id="attNo"
                name="attending"
                value=AttendanceMode::No.code()
                label=AttendanceMode::No.display_name()
                checked=Signal::derive(move || vm.mode() == AttendanceMode::No)
                disabled=disabled
                on_change=on_change
            />
            <Show when=move || vm.is_invalid(FieldId::Attending)>
                <div class="invalid-feedback d-block">"Please choose yes or no."</div>
            </Show>
        </fieldset>
    }
}

#[component]
pub fn RsvpPage() -> impl IntoView {
    let ctx = use_page_context();
    let vm = RsvpFormViewModel::new(ctx);
    let config = ctx.config();

    let section_class = move |section: FormSection| {
        let shown = vm.session.with(|s| s.controller.section_visible(section));
        if shown {
            "collapse show"
        } else {
            "collapse"
        }
    };
    let field = move |id: FieldId| Signal::derive(move || vm.field_value(id));
    let required = move |id: FieldId| Signal::derive(move || vm.is_required(id));
    let invalid = move |id: FieldId| Signal::derive(move || vm.is_invalid(id));
    let input = move |id: FieldId| Callback::new(move |value: String| vm.on_field_input(id, value));
    let submit_disabled = Signal::derive(move || vm.is_submitting.get());

    view! {
        <div class="card rsvp-card">
            <div class="card-body">
                <h2 class="card-title">{config.event.title.clone()}": RSVP"</h2>

                <form
                    id="rsvpForm"
                    action=config.relay.endpoint.clone()
                    method="POST"
                    novalidate=true
                    class=move || {
                        if vm.session.with(|s| s.controller.was_validated()) {
                            "was-validated"
                        } else {
                            ""
                        }
                    }
                    on:submit=move |ev| {
                        ev.prevent_default();
                        vm.submit_command();
                    }
                >
                    <Input
                        id=FieldId::ChildName.wire_name()
                        label="Child's name (as on the invitation)"
                        value=field(FieldId::ChildName)
                        required=true
                        invalid=invalid(FieldId::ChildName)
                        autocomplete="off"
                        on_input=Callback::new(move |value: String| vm.on_child_name_input(value))
                        on_blur=Callback::new(move |_| vm.on_child_name_blur())
                    />
                    <AccessStatus vm=vm />

                    <Input
                        id=FieldId::ParentName.wire_name()
                        label="Parent / guardian name"
                        value=field(FieldId::ParentName)
                        required=required(FieldId::ParentName)
                        invalid=invalid(FieldId::ParentName)
                        autocomplete="name"
                        on_input=input(FieldId::ParentName)
                    />

                    <AttendanceChoice vm=vm />

                    // Honeypot: hidden from people, bots fill it in
                    <div class="d-none" aria-hidden="true">
                        <input
                            type="text"
                            name=FieldId::Honeypot.wire_name()
                            tabindex="-1"
                            autocomplete="off"
                            prop:value=move || vm.field_value(FieldId::Honeypot)
                            on:input=move |ev| vm.on_field_input(FieldId::Honeypot, event_target_value(&ev))
                        />
                    </div>

                    <div id="rsvpYes" class=move || section_class(FormSection::Attending)>
                        <Input
                            id=FieldId::Phone.wire_name()
                            label="Contact mobile"
                            input_type="tel"
                            placeholder="07XXXXXXXXX"
                            value=field(FieldId::Phone)
                            required=required(FieldId::Phone)
                            invalid=invalid(FieldId::Phone)
                            feedback=PHONE_HINT
                            autocomplete="tel"
                            on_input=input(FieldId::Phone)
                            on_blur=Callback::new(move |_| {
                                let current = vm.field_value(FieldId::Phone);
                                vm.on_field_input(FieldId::Phone, current);
                            })
                        />
                        <Input
                            id=FieldId::EmergencyContact.wire_name()
                            label="Emergency contact on the day"
                            value=field(FieldId::EmergencyContact)
                            required=required(FieldId::EmergencyContact)
                            invalid=invalid(FieldId::EmergencyContact)
                            on_input=input(FieldId::EmergencyContact)
                        />
                        <Textarea
                            id=FieldId::DietaryNotes.wire_name()
                            label="Allergies or dietary needs"
                            value=field(FieldId::DietaryNotes)
                            on_input=input(FieldId::DietaryNotes)
                        />
                        <Button
                            id="rsvpBtnYes"
                            button_type="submit"
                            variant="success"
                            disabled=submit_disabled
                            busy=submit_disabled
                        >
                            "Send RSVP (Yes)"
                        </Button>
                    </div>

                    <div id="rsvpNo" class=move || section_class(FormSection::NotAttending)>
                        <Textarea
                            id=FieldId::DeclineMessage.wire_name()
                            label="Anything you'd like to tell us?"
                            value=field(FieldId::DeclineMessage)
                            on_input=input(FieldId::DeclineMessage)
                        />
                        <Button
                            id="rsvpBtnNo"
                            button_type="submit"
                            variant="secondary"
                            disabled=submit_disabled
                            busy=submit_disabled
                        >
                            "Send RSVP (No)"
                        </Button>
                    </div>

                    // Visible while no section is open, so a premature submit still gets feedback
                    <Show when=move || vm.mode() == AttendanceMode::None>
                        <Button button_type="submit" disabled=submit_disabled busy=submit_disabled>
                            "Send RSVP"
                        </Button>
                    </Show>
                </form>

                <div id="rsvpAlert" role="alert" aria-live="assertive">
                    {move || vm.alert.get().map(|alert| {
                        let class = format!("alert alert-{} mt-3", alert.kind);
                        view! { <div class=class>{alert.message}</div> }
                    })}
                </div>
            </div>
        </div>
    }
}
