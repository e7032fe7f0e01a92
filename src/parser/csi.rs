//! CSI (Control Sequence Introducer) dispatch (spec.md §4.3).

use crate::screen::{DisplayClearMode, LineClearMode, Screen};

/// `params[idx]`, treating a missing or explicit-zero parameter as
/// `default` — the convention cursor-motion and column-goto parameters use
/// ("`n` defaults to 1 if omitted or zero").
fn motion_param(params: &[u32], idx: usize, default: u32) -> u32 {
    match params.get(idx) {
        None | Some(0) => default,
        Some(&n) => n,
    }
}

/// `params[idx]`, treating only a *missing* parameter as `default` — used
/// for erase-mode parameters, where an explicit `0` is itself meaningful.
fn mode_param(params: &[u32], idx: usize, default: u32) -> u32 {
    params.get(idx).copied().unwrap_or(default)
}

/// Dispatch one finished CSI sequence to `screen`.
///
/// `?`-prefixed (private/DECSET-style) sequences are recognized and
/// silently ignored per spec.md §4.3; unrecognized finals are dropped.
pub fn dispatch(screen: &mut Screen, params: &[u32], private: bool, final_byte: u8) {
    if private {
        log::trace!("ignoring private CSI sequence (final {:?})", final_byte as char);
        return;
    }

    match final_byte {
        b'A' => screen.up(motion_param(params, 0, 1) as usize),
        b'B' => screen.down(motion_param(params, 0, 1) as usize),
        b'C' => screen.forward(motion_param(params, 0, 1) as usize),
        b'D' => screen.back(motion_param(params, 0, 1) as usize),
        b'G' => {
            let col = motion_param(params, 0, 1);
            screen.goto_column((col - 1) as usize);
        }
        b'J' => match mode_param(params, 0, 0) {
            0 => screen.clear_display(DisplayClearMode::Below),
            1 => screen.clear_display(DisplayClearMode::Above),
            2 | 3 => screen.clear_display(DisplayClearMode::All),
            other => log::trace!("ignoring unknown CSI J mode {other}"),
        },
        b'K' => match mode_param(params, 0, 0) {
            0 => screen.clear_line(LineClearMode::After),
            1 => screen.clear_line(LineClearMode::Before),
            2 => screen.clear_line(LineClearMode::All),
            other => log::trace!("ignoring unknown CSI K mode {other}"),
        },
        b'm' => screen.apply_sgr(params),
        other => log::trace!("dropping unrecognized CSI final {:?}", other as char),
    }
}
