//! Latency extraction from free-form ping output
//!
//! Every reply line printed by the common ping implementations carries a
//! `time=<value>ms` (or `time<1ms` on Windows) token. Anything else in the
//! output, including the summary block, is ignored.

const MARKERS: [&str; 2] = ["time=", "time<"];

/// Extract one latency sample (milliseconds) per reply line.
///
/// Lines whose value cannot be read as a number are skipped.
pub fn parse_latencies(text: &str) -> Vec<f64> {
    text.lines().filter_map(parse_latency_line).collect()
}

/// Latency carried by a single reply line, if any
pub fn parse_latency_line(line: &str) -> Option<f64> {
    let rest = MARKERS
        .iter()
        .find_map(|marker| line.find(marker).map(|idx| &line[idx + marker.len()..]))?;

    let value = rest.split("ms").next()?.trim();
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINUX_OUTPUT: &str = "\
PING 8.8.8.8 (8.8.8.8) 56(84) bytes of data.
64 bytes from 8.8.8.8: icmp_seq=1 ttl=117 time=12.3 ms
64 bytes from 8.8.8.8: icmp_seq=2 ttl=117 time=11.8 ms
64 bytes from 8.8.8.8: icmp_seq=3 ttl=117 time=12.5 ms
64 bytes from 8.8.8.8: icmp_seq=4 ttl=117 time=12.0 ms

--- 8.8.8.8 ping statistics ---
4 packets transmitted, 4 received, 0% packet loss, time 3004ms
rtt min/avg/max/mdev = 11.800/12.150/12.500/0.260 ms
";

    const MACOS_PARTIAL_OUTPUT: &str = "\
PING example.com (93.184.216.34): 56 data bytes
64 bytes from 93.184.216.34: icmp_seq=0 ttl=56 time=89.512 ms
Request timeout for icmp_seq 1
64 bytes from 93.184.216.34: icmp_seq=2 ttl=56 time=90.004 ms

--- example.com ping statistics ---
3 packets transmitted, 2 packets received, 33.3% packet loss
round-trip min/avg/max/stddev = 89.512/89.758/90.004/0.246 ms
";

    const WINDOWS_OUTPUT: &str = "\r
Pinging 192.168.1.1 with 32 bytes of data:\r
Reply from 192.168.1.1: bytes=32 time<1ms TTL=64\r
Reply from 192.168.1.1: bytes=32 time=14ms TTL=64\r
Request timed out.\r
Reply from 192.168.1.1: bytes=32 time=3ms TTL=64\r
\r
Ping statistics for 192.168.1.1:\r
    Packets: Sent = 4, Received = 3, Lost = 1 (25% loss),\r
Approximate round trip times in milli-seconds:\r
    Minimum = 0ms, Maximum = 14ms, Average = 5ms\r
";

    const BUSYBOX_OUTPUT: &str = "\
PING 10.0.0.1 (10.0.0.1): 56 data bytes
64 bytes from 10.0.0.1: seq=0 ttl=64 time=0.412 ms
64 bytes from 10.0.0.1: seq=1 ttl=64 time=0.389 ms
";

    const UNREACHABLE_OUTPUT: &str = "\
PING 10.255.255.1 (10.255.255.1) 56(84) bytes of data.

--- 10.255.255.1 ping statistics ---
4 packets transmitted, 0 received, 100% packet loss, time 3062ms
";

    #[test]
    fn test_linux_output() {
        assert_eq!(parse_latencies(LINUX_OUTPUT), vec![12.3, 11.8, 12.5, 12.0]);
    }

    #[test]
    fn test_macos_partial_output() {
        assert_eq!(parse_latencies(MACOS_PARTIAL_OUTPUT), vec![89.512, 90.004]);
    }

    #[test]
    fn test_windows_output_including_less_than_marker() {
        assert_eq!(parse_latencies(WINDOWS_OUTPUT), vec![1.0, 14.0, 3.0]);
    }

    #[test]
    fn test_busybox_output() {
        assert_eq!(parse_latencies(BUSYBOX_OUTPUT), vec![0.412, 0.389]);
    }

    #[test]
    fn test_no_replies() {
        assert!(parse_latencies(UNREACHABLE_OUTPUT).is_empty());
        assert!(parse_latencies("").is_empty());
    }

    #[test]
    fn test_summary_time_field_is_not_a_sample() {
        assert_eq!(parse_latency_line("4 packets transmitted, 4 received, 0% packet loss, time 3004ms"), None);
    }

    #[test]
    fn test_malformed_values_are_skipped() {
        assert_eq!(parse_latency_line("reply time=abc ms"), None);
        assert_eq!(parse_latency_line("reply time= ms"), None);
        assert_eq!(parse_latency_line("reply time=NaN ms"), None);
        assert_eq!(parse_latency_line("reply time=-3 ms"), None);
        assert_eq!(parse_latency_line("time=5.5ms"), Some(5.5));
    }

    #[test]
    fn test_missing_unit_parses_remainder() {
        assert_eq!(parse_latency_line("time=7"), Some(7.0));
        assert_eq!(parse_latency_line("time=7 TTL=64"), None);
    }
}
