// ============================================================
// Layer 1 — Console Menu Dispatcher
// ============================================================
// Line-based menu over any BufRead / Write pair:
//
//   Tests for MLP_32x32 model
//     1: Run with zeros input
//     2: Run with random input
//     g: Run golden tests (check for expected outputs)
//     x: Exit
//   test>
//
// The first non-blank character of each line selects an item.
// Menu items win over the built-in keys: `?` or `h` reprints the
// menu and `x` leaves it only when no item is registered under
// that key. End of input always leaves.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::domain::menu::{Menu, MenuAction};
use crate::domain::traits::MenuDispatcher;

const EXIT_KEY: char = 'x';

pub struct ConsoleMenu<R: BufRead, W: Write> {
    input: R,
    out:   W,
}

impl<R: BufRead, W: Write> ConsoleMenu<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    fn print_menu(&mut self, menu: &Menu) -> Result<()> {
        writeln!(self.out, "\n{}", menu.title)?;
        for item in &menu.items {
            writeln!(self.out, "  {}: {}", item.key, item.label)?;
        }
        if menu.lookup(EXIT_KEY).is_none() {
            writeln!(self.out, "  {EXIT_KEY}: Exit")?;
        }
        Ok(())
    }

    /// Next non-blank key, or None at end of input.
    fn read_key(&mut self, menu: &Menu) -> Result<Option<char>> {
        loop {
            write!(self.out, "{}> ", menu.command)?;
            self.out.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            if let Some(key) = line.trim().chars().next() {
                return Ok(Some(key));
            }
        }
    }
}

impl<R: BufRead, W: Write> MenuDispatcher for ConsoleMenu<R, W> {
    fn run(
        &mut self,
        menu:      &Menu,
        on_select: &mut dyn FnMut(MenuAction) -> Result<()>,
    ) -> Result<()> {
        self.print_menu(menu)?;

        while let Some(key) = self.read_key(menu)? {
            match (menu.lookup(key), key) {
                (Some(action), _) => {
                    tracing::debug!(?action, "Menu selection");
                    if let Err(e) = on_select(action) {
                        tracing::error!("{action:?} failed: {e:#}");
                        writeln!(self.out, "error: {e:#}")?;
                    }
                }
                (None, EXIT_KEY) => break,
                (None, '?' | 'h') => self.print_menu(menu)?,
                (None, _) => writeln!(self.out, "Unknown command '{key}'")?,
            }
        }
        writeln!(self.out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::io::Cursor;

    use crate::domain::menu::MenuItem;

    fn run(script: &str, fail_on: Option<MenuAction>) -> (Vec<MenuAction>, String) {
        run_menu(&Menu::self_test("MLP_32x32"), script, fail_on)
    }

    fn run_menu(menu: &Menu, script: &str, fail_on: Option<MenuAction>) -> (Vec<MenuAction>, String) {
        let mut console = ConsoleMenu::new(Cursor::new(script.to_string()), Vec::new());
        let mut seen = Vec::new();

        console
            .run(menu, &mut |action| {
                seen.push(action);
                if Some(action) == fail_on {
                    bail!("backend fault");
                }
                Ok(())
            })
            .unwrap();

        (seen, String::from_utf8(console.into_output()).unwrap())
    }

    #[test]
    fn test_dispatches_by_key_until_exit() {
        let (seen, _) = run("1\n2\ng\nx\n1\n", None);
        assert_eq!(
            seen,
            vec![MenuAction::ClassifyZeros, MenuAction::ClassifySample, MenuAction::GoldenTest]
        );
    }

    #[test]
    fn test_end_of_input_leaves_menu() {
        let (seen, _) = run("g\n", None);
        assert_eq!(seen, vec![MenuAction::GoldenTest]);
    }

    #[test]
    fn test_prints_title_items_and_prompt() {
        let (_, out) = run("x\n", None);
        assert!(out.contains("Tests for MLP_32x32 model\n"));
        assert!(out.contains("  1: Run with zeros input\n"));
        assert!(out.contains("  g: Run golden tests (check for expected outputs)\n"));
        assert!(out.contains("  x: Exit\n"));
        assert!(out.contains("test> "));
    }

    #[test]
    fn test_unknown_and_blank_lines() {
        let (seen, out) = run("\n   \nq\n1\n", None);
        assert_eq!(seen, vec![MenuAction::ClassifyZeros]);
        assert!(out.contains("Unknown command 'q'"));
    }

    #[test]
    fn test_leading_whitespace_is_ignored() {
        let (seen, _) = run("  2  \n", None);
        assert_eq!(seen, vec![MenuAction::ClassifySample]);
    }

    #[test]
    fn test_action_error_keeps_loop_running() {
        let (seen, out) = run("1\n1\n", Some(MenuAction::ClassifyZeros));
        assert_eq!(seen.len(), 2);
        assert_eq!(out.matches("error: backend fault").count(), 2);
    }

    #[test]
    fn test_help_reprints_menu() {
        let (_, out) = run("?\n", None);
        assert_eq!(out.matches("  x: Exit").count(), 2);
    }

    #[test]
    fn test_items_win_over_builtin_keys() {
        let menu = Menu::new(
            "Custom",
            "t",
            vec![
                MenuItem::new('h', "Zeros", MenuAction::ClassifyZeros),
                MenuItem::new('x', "Golden", MenuAction::GoldenTest),
            ],
        );
        let (seen, out) = run_menu(&menu, "h\nx\n?\n", None);
        assert_eq!(seen, vec![MenuAction::ClassifyZeros, MenuAction::GoldenTest]);
        // no exit line when 'x' belongs to an item; '?' still reprints
        assert!(!out.contains("x: Exit"));
        assert_eq!(out.matches("Custom\n").count(), 2);
    }
}
