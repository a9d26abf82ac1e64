//! The emitter's event contract: turns a finalized route into the
//! COMPR_DR/COMPR_EXIT/COMPR_REPEAT stream, the preload block, and the
//! resync trace, per spec.md §6.
//!
//! Grounded on `Emitter.C`'s `writeJTAG`/`writePreload`/`writeResyncFile`.
//! Those functions also write a textual Verilog shift program against
//! prefix/infix/suffix template files; that file-emission surface is a
//! Non-goal, so only the bit-exact event/preload/resync content they
//! produce is implemented here.

use crate::replacement::Route;

/// One shift-cycle event the hardware testbench consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// One data bit, LSB (of the CDW's own encoding) shifted first.
    Bit(bool),
    ComprExit,
    ComprRepeat,
}

/// The full per-replacement event stream for a finalized route.
pub fn emit_route(route: &Route) -> Vec<Event> {
    let mut events = Vec::with_capacity(route.len() * 2);
    for repl in route.iter() {
        if repl.cdw.is_empty_cdw() {
            events.push(Event::ComprRepeat);
            continue;
        }
        for c in repl.cdw.encoding().chars().rev() {
            events.push(Event::Bit(c == '1'));
        }
        events.push(Event::ComprExit);
    }
    events
}

/// Preload bits for the `TBC` list: each UDW's literal bits plus a
/// length-tag bit (`0` appended for length 4, `1` inserted at position 4
/// for length 8), shifted LSB-first.
pub fn preload_bits(tbcs: &[String]) -> Vec<bool> {
    let mut out = Vec::new();
    for udw in tbcs {
        let mut config = udw.clone();
        if config.len() == 4 {
            config.push('0');
        } else {
            config.insert(4, '1');
        }
        for c in config.chars().rev() {
            out.push(c == '1');
        }
    }
    out
}

/// Renders an event stream as one instruction per line (`DR 0`/`DR 1` for a
/// data bit, `EXIT`/`REPEAT` for the terminators), the textual form a CLI
/// writes out for inspection or for feeding a testbench.
pub fn render_events(events: &[Event]) -> String {
    let mut out = String::new();
    for event in events {
        match event {
            Event::Bit(true) => out.push_str("DR 1\n"),
            Event::Bit(false) => out.push_str("DR 0\n"),
            Event::ComprExit => out.push_str("EXIT\n"),
            Event::ComprRepeat => out.push_str("REPEAT\n"),
        }
    }
    out
}

/// The persisted resync trace: `delay` dashes, then for each burst
/// `(cycle, dist)` in route order, dashes up to `cycle` followed by `dist`
/// `'D'`s.
pub fn resync_string(collector: &[(usize, usize)], delay: usize) -> String {
    let mut s = String::new();
    s.push_str(&"-".repeat(delay));
    let mut last_index = 0usize;
    for &(cycle, dist) in collector {
        s.push_str(&"-".repeat(cycle.saturating_sub(last_index)));
        s.push_str(&"D".repeat(dist));
        last_index = cycle;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdw::Cdw;
    use crate::replacement::Replacement;

    #[test]
    fn non_empty_cdw_ends_in_compr_exit() {
        let mut route = Route::new();
        route.push(Replacement::new(Cdw::Lll, 0, 3, 0));
        let events = emit_route(&route);
        assert_eq!(*events.last().unwrap(), Event::ComprExit);
        assert_eq!(events.len(), 4); // 3 data bits + exit
    }

    #[test]
    fn xxx_emits_only_compr_repeat() {
        let mut route = Route::new();
        route.push(Replacement::new(Cdw::Xxx, 0, 3, -3));
        assert_eq!(emit_route(&route), vec![Event::ComprRepeat]);
    }

    #[test]
    fn preload_tags_length_four_and_eight_udws_differently() {
        let bits4 = preload_bits(&["0101".to_string()]);
        assert_eq!(bits4.len(), 5);
        let bits8 = preload_bits(&["01010101".to_string()]);
        assert_eq!(bits8.len(), 9);
    }

    #[test]
    fn resync_string_has_dashes_then_bursts() {
        let s = resync_string(&[(2, 3)], 1);
        assert_eq!(s, "-" .to_string() + "--" + "DDD");
    }

    #[test]
    fn render_events_emits_one_instruction_per_line() {
        let mut route = Route::new();
        route.push(Replacement::new(Cdw::Lxx, 0, 1, 0));
        let rendered = render_events(&emit_route(&route));
        assert_eq!(rendered, "DR 0\nEXIT\n");
    }
}
