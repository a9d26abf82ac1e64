//! Parallel-to-serial buffer analysis: how much startup delay the decoder
//! needs so its burst output never outruns (or starves) the serial link.
//!
//! Grounded on `P2SBuffer.C`. Per spec.md §9, cycle advances by the most
//! recent non-`XXX` CDW's *encoded* length (not the UDW length it decodes
//! to) — that detail is authoritative over the source's tangled increment
//! expression.

use crate::replacement::Route;

pub struct P2SBuffer {
    pub max_cycles: usize,
}

impl P2SBuffer {
    /// `(consumption_cycle, burst_size)` per replacement in route order.
    pub fn collect(&self, route: &Route) -> Vec<(usize, usize)> {
        let mut collector = Vec::with_capacity(route.len());
        let mut cycle = 0usize;
        let mut last_length = 0usize;
        for repl in route.iter() {
            if !repl.cdw.is_empty_cdw() {
                last_length = repl.cdw.length();
            }
            cycle += last_length;
            collector.push((cycle, repl.len()));
        }
        collector
    }

    fn simulate(&self, collector: &[(usize, usize)], delay: usize, size: usize) -> Vec<i64> {
        let mut buf = vec![0i64; size.max(1)];
        let mut idx = delay;
        for &(data_cycle, dist) in collector {
            if idx < buf.len() {
                buf[idx] -= 1;
            }
            if delay > 0 && data_cycle < delay {
                if delay - 1 < buf.len() {
                    buf[delay - 1] += dist as i64;
                }
                continue;
            }
            while idx < data_cycle && idx + 1 < buf.len() {
                buf[idx + 1] = buf[idx] - 1;
                idx += 1;
            }
            if idx == data_cycle && idx < buf.len() {
                buf[idx] = dist as i64;
                if idx > 0 && buf[idx - 1] > 0 {
                    buf[idx] += buf[idx - 1];
                }
            }
        }
        buf
    }

    /// Returns `(delay, buffer trace)`; `buffer.iter().max()` is the
    /// physical buffer depth the decoder must provision.
    pub fn process_route(&self, route: &Route) -> (usize, Vec<i64>) {
        let collector = self.collect(route);
        let initial = self.simulate(&collector, 0, self.max_cycles);
        let min_val = *initial.iter().min().unwrap_or(&0);
        if min_val >= 0 {
            return (0, initial);
        }
        let delay = self.determine_delay(&collector, (-min_val) as usize);
        let buf = self.simulate(&collector, delay, self.max_cycles + delay);
        (delay, buf)
    }

    fn determine_delay(&self, collector: &[(usize, usize)], start: usize) -> usize {
        let mut delay = start.max(1);
        loop {
            let buf = self.simulate(collector, delay, self.max_cycles + delay);
            let min_val = *buf.iter().min().unwrap_or(&0);
            if min_val >= 0 || delay >= self.max_cycles {
                return delay;
            }
            delay += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdw::Cdw;
    use crate::replacement::Replacement;

    #[test]
    fn light_traffic_needs_no_delay() {
        let mut route = Route::new();
        route.push(Replacement::new(Cdw::Lxx, 0, 1, 0));
        route.push(Replacement::new(Cdw::Lxx, 1, 2, 0));
        let p2s = P2SBuffer { max_cycles: 16 };
        let (delay, buf) = p2s.process_route(&route);
        assert_eq!(delay, 0);
        assert!(buf.iter().all(|&b| b >= 0));
    }

    #[test]
    fn bursty_traffic_produces_a_non_negative_delayed_trace() {
        let mut route = Route::new();
        route.push(Replacement::new(Cdw::Lxx, 0, 1, -6));
        for i in 0..8 {
            route.push(Replacement::new(Cdw::Lxx, 1 + i, 2 + i, -1));
        }
        let p2s = P2SBuffer { max_cycles: 32 };
        let (_delay, buf) = p2s.process_route(&route);
        assert!(buf.iter().all(|&b| b >= 0));
    }
}
