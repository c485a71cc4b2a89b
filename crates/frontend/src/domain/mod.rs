pub mod a001_guest_list;
pub mod a002_rsvp;
