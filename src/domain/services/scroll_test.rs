use super::Scroll;

#[test]
fn it_is_at_the_bottom_when_the_list_fits_the_viewport() {
    let mut scroll = Scroll::default();
    scroll.set_state(5, 10);
    assert!(scroll.is_at_bottom());
}

#[test]
fn it_is_at_the_bottom_after_jumping_to_last() {
    let mut scroll = Scroll::default();
    scroll.set_state(50, 10);
    scroll.last();

    assert_eq!(scroll.position, 40);
    assert!(scroll.is_at_bottom());
}

#[test]
fn it_leaves_the_bottom_when_scrolling_up() {
    let mut scroll = Scroll::default();
    scroll.set_state(50, 10);
    scroll.last();
    scroll.up();

    assert!(!scroll.is_at_bottom());
}

#[test]
fn it_returns_to_the_bottom_when_scrolling_back_down() {
    let mut scroll = Scroll::default();
    scroll.set_state(50, 10);
    scroll.last();
    scroll.up();
    scroll.down();

    assert!(scroll.is_at_bottom());
}

#[test]
fn it_clamps_scrolling_past_either_end() {
    let mut scroll = Scroll::default();
    scroll.set_state(15, 10);

    scroll.up();
    assert_eq!(scroll.position, 0);

    for _ in 0..30 {
        scroll.down();
    }
    assert_eq!(scroll.position, 5);
}
