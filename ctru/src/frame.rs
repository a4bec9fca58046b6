//! The frame loop every application runs: scan input, present, wait for
//! vertical blank.

use crate::keys::KeyPad;

/// What a frame loop needs from the console.
pub trait Platform {
    /// `false` once the applet manager wants the application to quit.
    fn main_loop(&mut self) -> bool;

    /// Samples input, returning the keys pressed since the previous scan.
    fn scan_input(&mut self) -> KeyPad;

    /// Flushes and swaps the framebuffers.
    fn present(&mut self);

    fn wait_for_vblank(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameExit {
    /// Exit keys that went down on the last frame.
    KeyPressed(KeyPad),
    AppletClosed,
}

/// Runs frames until any of `exit` is newly pressed.
///
/// The frame in which an exit key is seen is not presented.
pub fn run_until<P>(platform: &mut P, exit: KeyPad) -> FrameExit
where
    P: Platform + ?Sized,
{
    let mut frames = 0_u64;
    while platform.main_loop() {
        let down = platform.scan_input();
        if down.intersects(exit) {
            log::debug!("Exit keys {:?} pressed after {frames} frames", down & exit);
            return FrameExit::KeyPressed(down & exit);
        }

        platform.present();
        platform.wait_for_vblank();
        frames += 1;
    }

    log::debug!("Applet main loop ended after {frames} frames");
    FrameExit::AppletClosed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyState;

    /// Replays held-key levels, one per frame, then closes the applet.
    struct Scripted {
        held: Vec<KeyPad>,
        frame: usize,
        keys: KeyState,
        presented: usize,
        vblanks: usize,
    }

    impl Scripted {
        fn new(held: Vec<KeyPad>) -> Self {
            Scripted {
                held,
                frame: 0,
                keys: KeyState::new(),
                presented: 0,
                vblanks: 0,
            }
        }
    }

    impl Platform for Scripted {
        fn main_loop(&mut self) -> bool {
            self.frame < self.held.len()
        }

        fn scan_input(&mut self) -> KeyPad {
            let held = self.held[self.frame];
            self.frame += 1;
            self.keys.update(held)
        }

        fn present(&mut self) {
            self.presented += 1;
        }

        fn wait_for_vblank(&mut self) {
            assert_eq!(self.vblanks + 1, self.presented, "vblank before present");
            self.vblanks += 1;
        }
    }

    #[test]
    fn start_press_ends_loop_without_presenting() {
        let mut script = vec![KeyPad::empty(); 5];
        script.push(KeyPad::START);
        script.extend([KeyPad::empty(); 5]);
        let mut platform = Scripted::new(script);

        let exit = run_until(&mut platform, KeyPad::START);

        assert_eq!(exit, FrameExit::KeyPressed(KeyPad::START));
        assert_eq!(platform.frame, 6);
        assert_eq!(platform.presented, 5);
        assert_eq!(platform.vblanks, 5);
    }

    #[test]
    fn other_keys_keep_running() {
        let script = [
            KeyPad::A,
            KeyPad::A | KeyPad::B,
            KeyPad::SELECT,
            KeyPad::DPAD_UP | KeyPad::CPAD_LEFT,
            KeyPad::all().difference(KeyPad::START),
        ]
        .repeat(100);
        let frames = script.len();
        let mut platform = Scripted::new(script);

        assert_eq!(run_until(&mut platform, KeyPad::START), FrameExit::AppletClosed);
        assert_eq!(platform.presented, frames);
    }

    #[test]
    fn start_among_other_keys_exits() {
        let mut platform = Scripted::new(vec![KeyPad::A, KeyPad::A | KeyPad::START | KeyPad::X]);

        assert_eq!(
            run_until(&mut platform, KeyPad::START),
            FrameExit::KeyPressed(KeyPad::START)
        );
        assert_eq!(platform.presented, 1);
    }

    #[test]
    fn held_exit_key_is_seen_on_its_first_frame() {
        let mut platform = Scripted::new(vec![KeyPad::A, KeyPad::START, KeyPad::START]);
        run_until(&mut platform, KeyPad::START);
        assert_eq!(platform.frame, 2);

        let mut keys = KeyState::new();
        let downs: Vec<_> = [KeyPad::START; 4].iter().map(|&k| keys.update(k)).collect();
        assert_eq!(downs.iter().filter(|d| d.contains(KeyPad::START)).count(), 1);
    }

    #[test]
    fn closed_applet_runs_no_frames() {
        let mut platform = Scripted::new(Vec::new());
        assert_eq!(run_until(&mut platform, KeyPad::START), FrameExit::AppletClosed);
        assert_eq!(platform.presented, 0);
    }
}
