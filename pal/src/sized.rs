/* # Why a shared two-pass helper?

Several OS interfaces follow the same protocol: one call to learn the required
buffer length, a second call to fill it, and a retry if the value grew in
between. Encoding conversion, final-path queries and wide environment-variable
lookups all share that dance; this helper implements the reserve/retry logic
once instead of duplicating it per call site.
*/

/// Runs a query-length-then-fill OS protocol.
///
/// `size` returns the number of elements to reserve (a failure here is the
/// caller's sizing error, e.g. strict-validation rejection). `fill` writes
/// into the reserved buffer and returns either the element count actually
/// written (`<= buf.len()`, which ends the loop) or a larger required count,
/// which grows the buffer and retries. The loop is bounded by the OS
/// eventually reporting success or a non-retryable failure.
///
/// A zero-length result from `size` yields an empty buffer without calling
/// `fill`.
pub fn two_pass<T, E>(
    size: impl FnOnce() -> Result<usize, E>,
    mut fill: impl FnMut(&mut [T]) -> Result<usize, E>,
) -> Result<Vec<T>, E>
where
    T: Default + Clone,
{
    let needed = size()?;
    if needed == 0 {
        return Ok(Vec::new());
    }
    let mut buf = vec![T::default(); needed];
    loop {
        let reported = fill(&mut buf)?;
        if reported <= buf.len() {
            buf.truncate(reported);
            return Ok(buf);
        }
        // Value grew between the sizing call and the fill call.
        buf.resize(reported, T::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_pass_exact_fit() {
        let data = b"hello";
        let result: Result<Vec<u8>, ()> = two_pass(
            || Ok(data.len()),
            |buf| {
                buf.copy_from_slice(data);
                Ok(data.len())
            },
        );
        assert_eq!(result.unwrap(), data);
    }

    #[test]
    fn test_two_pass_zero_length_skips_fill() {
        let mut fill_calls = 0;
        let result: Result<Vec<u8>, ()> = two_pass(
            || Ok(0),
            |_| {
                fill_calls += 1;
                Ok(0)
            },
        );
        assert_eq!(result.unwrap(), Vec::<u8>::new());
        assert_eq!(fill_calls, 0);
    }

    #[test]
    fn test_two_pass_grows_on_larger_requirement() {
        // Simulates a value that grew between the sizing and the fill call.
        let mut attempt = 0;
        let result: Result<Vec<u16>, ()> = two_pass(
            || Ok(4),
            |buf| {
                attempt += 1;
                if buf.len() < 8 {
                    Ok(8)
                } else {
                    buf[..8].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
                    Ok(8)
                }
            },
        );
        assert_eq!(result.unwrap(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(attempt, 2);
    }

    #[test]
    fn test_two_pass_sizing_failure_propagates() {
        let err: Result<Vec<u8>, &str> = two_pass(|| Err("invalid input"), |_| Ok(0));
        assert_eq!(err.unwrap_err(), "invalid input");
    }

    #[test]
    fn test_two_pass_truncates_to_written() {
        let result: Result<Vec<u8>, ()> = two_pass(
            || Ok(16),
            |buf| {
                buf[0] = 9;
                buf[1] = 8;
                Ok(2)
            },
        );
        assert_eq!(result.unwrap(), vec![9, 8]);
    }
}
