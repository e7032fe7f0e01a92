use crate::cell::Node;

use super::{DisplayClearMode, LineClearMode, Screen};

fn text(screen: &Screen, y: usize) -> String {
    screen.lines()[y]
        .iter()
        .map(|c| match &c.node {
            Node::Text(ch) => *ch,
            Node::Element(_) => '\u{FFFD}',
        })
        .collect()
}

#[test]
fn write_advances_cursor() {
    let mut screen = Screen::new();
    screen.write('a');
    screen.write('b');
    assert_eq!(screen.cursor_x(), 2);
    assert_eq!(text(&screen, 0), "ab");
}

#[test]
fn write_past_end_of_line_pads_with_spaces() {
    let mut screen = Screen::new();
    screen.write('a');
    screen.forward(3);
    screen.write('b');
    assert_eq!(text(&screen, 0), "a   b");
}

#[test]
fn write_past_last_line_creates_intervening_empty_lines() {
    let mut screen = Screen::new();
    screen.write('a');
    screen.down(2);
    screen.carriage_return();
    screen.write('b');
    assert_eq!(screen.lines().len(), 3);
    assert!(screen.lines()[1].is_empty());
    assert_eq!(text(&screen, 2), "b");
}

#[test]
fn backspace_never_crosses_lines() {
    let mut screen = Screen::new();
    screen.backspace();
    assert_eq!(screen.cursor_x(), 0);
}

#[test]
fn back_clamps_at_zero() {
    let mut screen = Screen::new();
    screen.forward(5);
    screen.back(100);
    assert_eq!(screen.cursor_x(), 0);
}

#[test]
fn up_clamps_at_zero() {
    let mut screen = Screen::new();
    screen.up(100);
    assert_eq!(screen.cursor_y(), 0);
}

#[test]
fn goto_column_is_zero_based() {
    let mut screen = Screen::new();
    screen.goto_column(4);
    assert_eq!(screen.cursor_x(), 4);
}

#[test]
fn clear_line_before_overwrites_through_cursor_keeping_length() {
    let mut screen = Screen::new();
    for c in "hello".chars() {
        screen.write(c);
    }
    screen.clear_line(LineClearMode::Before);
    assert_eq!(text(&screen, 0), "     ");
}

#[test]
fn clear_line_all_replaces_with_spaces_of_same_length() {
    let mut screen = Screen::new();
    for c in "hello friend".chars() {
        screen.write(c);
    }
    screen.clear_line(LineClearMode::All);
    assert_eq!(text(&screen, 0), "            ");
    assert_eq!(screen.cursor_x(), 12);
}

#[test]
fn clear_display_below_truncates_current_and_drops_later_lines() {
    let mut screen = Screen::new();
    for c in "one".chars() {
        screen.write(c);
    }
    screen.linefeed();
    screen.carriage_return();
    for c in "two".chars() {
        screen.write(c);
    }
    screen.up(1);
    screen.goto_column(1);
    screen.clear_display(DisplayClearMode::Below);
    assert_eq!(screen.lines().len(), 1);
    assert_eq!(text(&screen, 0), "o");
}

#[test]
fn clear_display_on_empty_screen_is_a_no_op() {
    let mut a = Screen::new();
    a.clear_display(DisplayClearMode::Below);
    for c in "hello".chars() {
        a.write(c);
    }

    let mut b = Screen::new();
    for c in "hello".chars() {
        b.write(c);
    }

    assert_eq!(text(&a, 0), text(&b, 0));
}

#[test]
fn clear_display_all_resets_cursor_and_empties_lines() {
    let mut screen = Screen::new();
    for c in "hello".chars() {
        screen.write(c);
    }
    screen.clear_display(DisplayClearMode::All);
    assert!(screen.lines().is_empty());
    assert_eq!((screen.cursor_x(), screen.cursor_y()), (0, 0));
}

#[test]
fn clear_display_all_preserves_the_style_register() {
    let mut screen = Screen::new();
    screen.apply_sgr(&[31]);
    screen.clear_display(DisplayClearMode::All);
    screen.write('a');
    assert!(!screen.lines()[0][0].style.is_empty());
}

#[test]
fn timestamp_annotates_the_line_it_was_set_on() {
    let mut screen = Screen::new();
    screen.set_timestamp("123");
    for c in "hi".chars() {
        screen.write(c);
    }
    assert_eq!(screen.line_timestamp(0), Some("123"));
}

#[test]
fn timestamp_persists_across_later_lines() {
    let mut screen = Screen::new();
    screen.set_timestamp("123");
    screen.write('a');
    screen.linefeed();
    screen.carriage_return();
    screen.write('b');
    assert_eq!(screen.line_timestamp(1), Some("123"));
}
