use crate::action::Action;
use crate::frame::InputFrame;
use crate::key::Key;
use serde::{Deserialize, Serialize};

/// Two keys driving one continuous quantity in opposite directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    pub positive: Key,
    pub negative: Key,
}

impl Axis {
    pub const fn new(positive: Key, negative: Key) -> Self {
        Self { positive, negative }
    }

    /// `1.0`, `-1.0`, or `0.0` when neither or both keys are held.
    pub fn value(&self, frame: &InputFrame) -> f32 {
        let mut v = 0.0;
        if frame.held(self.positive) {
            v += 1.0;
        }
        if frame.held(self.negative) {
            v -= 1.0;
        }
        v
    }
}

/// Movement and turn rates applied to held keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Speeds {
    /// World units per second for thrust and horizontal strafe.
    pub movement: f32,
    /// World units per second for vertical strafe.
    pub vertical: f32,
    /// Degrees per second for yaw, pitch and roll.
    pub angular: f32,
}

impl Default for Speeds {
    fn default() -> Self {
        Self {
            movement: 60.0,
            vertical: 60.0,
            angular: 45.0,
        }
    }
}

/// Named binding presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Free flight: Space/Shift strafe vertically, Tab toggles orbit.
    #[default]
    Fly,
    /// Orbit-camera layout: Space toggles orbit, no vertical strafe.
    Orbit,
}

/// The keyboard contract, as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings {
    pub thrust: Axis,
    /// Positive strafes left.
    pub strafe: Axis,
    pub vertical: Option<Axis>,
    /// Positive pitches the nose down.
    pub pitch: Axis,
    /// Positive turns left.
    pub yaw: Axis,
    /// Positive tilts up toward the right.
    pub roll: Option<Axis>,
    pub toggle_orbit: Key,
    pub exit: Key,
}

impl Bindings {
    /// WASD, Space/Shift, arrows, Q/E, Tab for orbit, Escape to quit.
    pub fn fly() -> Self {
        Self {
            thrust: Axis::new(Key::W, Key::S),
            strafe: Axis::new(Key::A, Key::D),
            vertical: Some(Axis::new(Key::Space, Key::Shift)),
            pitch: Axis::new(Key::Down, Key::Up),
            yaw: Axis::new(Key::Left, Key::Right),
            roll: Some(Axis::new(Key::E, Key::Q)),
            toggle_orbit: Key::Tab,
            exit: Key::Escape,
        }
    }

    /// Like [`Bindings::fly`], but Space toggles orbit mode.
    pub fn orbit() -> Self {
        Self {
            vertical: None,
            toggle_orbit: Key::Space,
            ..Self::fly()
        }
    }

    pub fn for_scheme(scheme: Scheme) -> Self {
        match scheme {
            Scheme::Fly => Self::fly(),
            Scheme::Orbit => Self::orbit(),
        }
    }

    /// Map one frame of input to actions.
    ///
    /// Continuous actions are scaled by `dt` and the matching speed; toggles
    /// fire only on the frame their key goes down.
    pub fn actions(&self, frame: &InputFrame, dt: f32, speeds: &Speeds) -> Vec<Action> {
        let mut actions = Vec::new();

        if frame.pressed(self.exit) {
            actions.push(Action::Exit);
        }
        if frame.pressed(self.toggle_orbit) {
            actions.push(Action::ToggleOrbit);
        }

        let step = speeds.movement * dt;
        let turn = speeds.angular * dt;

        let thrust = self.thrust.value(frame);
        if thrust != 0.0 {
            actions.push(Action::Thrust(thrust * step));
        }
        let strafe = self.strafe.value(frame);
        if strafe != 0.0 {
            actions.push(Action::StrafeHorizontal(strafe * step));
        }
        if let Some(vertical) = &self.vertical {
            let v = vertical.value(frame);
            if v != 0.0 {
                actions.push(Action::StrafeVertical(v * speeds.vertical * dt));
            }
        }
        let pitch = self.pitch.value(frame);
        if pitch != 0.0 {
            actions.push(Action::Pitch(pitch * turn));
        }
        let yaw = self.yaw.value(frame);
        if yaw != 0.0 {
            actions.push(Action::Yaw(yaw * turn));
        }
        if let Some(roll) = &self.roll {
            let r = roll.value(frame);
            if r != 0.0 {
                actions.push(Action::Roll(r * turn));
            }
        }

        actions
    }
}

impl Default for Bindings {
    fn default() -> Self {
        Self::fly()
    }
}
