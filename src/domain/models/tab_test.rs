use super::Tab;

#[test]
fn it_parses_valid_tabs() {
    assert_eq!(Tab::parse("about"), Some(Tab::About));
    assert_eq!(Tab::parse("projects"), Some(Tab::Projects));
    assert_eq!(Tab::parse("chat"), Some(Tab::Chat));
}

#[test]
fn it_rejects_unknown_tabs() {
    assert_eq!(Tab::parse("Chat"), None);
    assert_eq!(Tab::parse("settings"), None);
    assert_eq!(Tab::parse(""), None);
}

#[test]
fn it_defaults_to_about() {
    assert_eq!(Tab::default(), Tab::About);
}

#[test]
fn it_cycles_forwards_and_backwards() {
    assert_eq!(Tab::About.next(), Tab::Projects);
    assert_eq!(Tab::Chat.next(), Tab::About);
    assert_eq!(Tab::About.previous(), Tab::Chat);
    assert_eq!(Tab::Projects.previous(), Tab::About);
}

#[test]
fn it_displays_storage_values() {
    assert_eq!(Tab::Projects.to_string(), "projects");
    assert_eq!(Tab::Projects.title(), "Projects");
}
