/// Shift register of recent per-sample trigger bits
///
/// The newest sample is the lowest bit. Only the low `size` bits are ever
/// inspected, which gives the debounce its hysteresis: asserting needs
/// `size` triggered samples in a row, releasing needs `size` untriggered
/// ones.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TriggerWindow {
    bits: u32,
    mask: u32,
}

impl TriggerWindow {
    /// `size` must already be validated to `1..=32`
    pub(crate) const fn new(size: u8) -> Self {
        let mask = if size >= 32 {
            u32::MAX
        } else {
            (1u32 << size) - 1
        };
        Self { bits: 0, mask }
    }

    pub(crate) fn push(&mut self, triggered: bool) {
        self.bits = (self.bits << 1) | u32::from(triggered);
    }

    pub(crate) fn clear(&mut self) {
        self.bits = 0;
    }

    /// Every sample in the window triggered
    pub(crate) const fn all_set(&self) -> bool {
        self.bits & self.mask == self.mask
    }

    /// No sample in the window triggered
    pub(crate) const fn all_clear(&self) -> bool {
        self.bits & self.mask == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_window_hysteresis() {
        let mut window = TriggerWindow::new(3);
        window.push(true);
        window.push(true);
        assert!(!window.all_set());
        window.push(true);
        assert!(window.all_set());

        window.push(false);
        assert!(!window.all_set());
        assert!(!window.all_clear());
        window.push(true);
        window.push(false);
        assert!(!window.all_clear());
        window.push(false);
        assert!(!window.all_clear(), "Bit pushed two samples ago is still in the window");
        window.push(false);
        assert!(window.all_clear());
    }

    #[test]
    fn test_full_width_window() {
        let mut window = TriggerWindow::new(32);
        for _ in 0..31 {
            window.push(true);
        }
        assert!(!window.all_set());
        window.push(true);
        assert!(window.all_set());

        window.clear();
        assert!(window.all_clear());
    }
}
