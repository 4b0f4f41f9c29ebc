use std::{io::BufRead, str::FromStr, thread};

use tokio::sync::mpsc;

use crate::{core::DeviceId, prelude::*};

/// Out-of-schedule request to the watch loop.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Trigger {
    Refresh,
    SelectDevice(DeviceId),
    Quit,
}

impl FromStr for Trigger {
    type Err = Error;

    /// Parse a control line: empty or `r` to refresh, `d <id>` to switch the device, `q` to quit.
    fn from_str(line: &str) -> Result<Self> {
        match line.split_whitespace().collect::<Vec<_>>()[..] {
            [] | ["r"] => Ok(Self::Refresh),
            ["d", device_id] => Ok(Self::SelectDevice(
                device_id.parse().with_context(|| format!("invalid device ID `{device_id}`"))?,
            )),
            ["q"] => Ok(Self::Quit),
            _ => bail!("unknown command `{}`, expected: `r`, `d <id>`, or `q`", line.trim()),
        }
    }
}

/// Forward control lines into the channel until quit or end of input.
///
/// Blocks the calling thread, and must not be called from within the runtime.
pub fn read_controls(input: impl BufRead, triggers: &mpsc::Sender<Trigger>) -> Result {
    for line in input.lines() {
        let line = line.context("failed to read a control line")?;
        let trigger = match line.parse::<Trigger>() {
            Ok(trigger) => trigger,
            Err(error) => {
                warn!("{error:#}");
                continue;
            }
        };
        if triggers.blocking_send(trigger).is_err() || trigger == Trigger::Quit {
            break;
        }
    }
    debug!("Control input closed");
    Ok(())
}

/// Read the control lines from the standard input on a detached thread.
///
/// The thread never holds up the runtime shutdown, even while blocked on a read.
pub fn spawn_stdin_controls(triggers: mpsc::Sender<Trigger>) -> Result {
    thread::Builder::new()
        .name("controls".into())
        .spawn(move || {
            if let Err(error) = read_controls(std::io::stdin().lock(), &triggers) {
                warn!("{error:#}");
            }
        })
        .context("failed to spawn the control thread")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() -> Result {
        assert_eq!("".parse::<Trigger>()?, Trigger::Refresh);
        assert_eq!("  r ".parse::<Trigger>()?, Trigger::Refresh);
        assert_eq!("d 42".parse::<Trigger>()?, Trigger::SelectDevice(42));
        assert_eq!("q".parse::<Trigger>()?, Trigger::Quit);
        Ok(())
    }

    #[test]
    fn test_parse_invalid() {
        assert!("d".parse::<Trigger>().is_err());
        assert!("d forty-two".parse::<Trigger>().is_err());
        assert!("refresh now".parse::<Trigger>().is_err());
    }

    #[test]
    fn test_read_controls() -> Result {
        let (sender, mut receiver) = mpsc::channel(8);
        read_controls(&b"r\nbogus\nd 7\nq\nr\n"[..], &sender)?;
        drop(sender);
        assert_eq!(receiver.blocking_recv(), Some(Trigger::Refresh));
        assert_eq!(receiver.blocking_recv(), Some(Trigger::SelectDevice(7)));
        assert_eq!(receiver.blocking_recv(), Some(Trigger::Quit));
        assert_eq!(receiver.blocking_recv(), None);
        Ok(())
    }

    #[test]
    fn test_read_controls_stops_when_receiver_is_gone() -> Result {
        let (sender, receiver) = mpsc::channel(8);
        drop(receiver);
        read_controls(&b"r\nr\n"[..], &sender)?;
        Ok(())
    }
}
