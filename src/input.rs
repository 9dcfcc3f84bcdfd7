use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy_hood_physics_integration_layer::data_for_backends::HoodToggle;
use bevy_hood_physics_integration_layer::HoodPipelineSystems;

/// Discrete input events the character reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoodAction {
    Jump,
    Crouch,
    /// Switch the power between pushing and pulling.
    ChangePower,
    /// Use the power, for as long as it is held.
    ActivePower,
    Interact,
}

/// Continuous input values, sampled once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoodAxis {
    MoveForward,
    MoveRight,
    /// Absolute yaw delta, e.g. from a mouse.
    Turn,
    /// Yaw rate, e.g. from an analog stick.
    TurnRate,
    /// Absolute pitch delta, e.g. from a mouse.
    LookUp,
    /// Pitch rate, e.g. from an analog stick.
    LookUpRate,
    /// Grows or shrinks the power magnitude.
    ChangePowerValue,
}

impl HoodAxis {
    pub const ALL: [Self; 7] = [
        Self::MoveForward,
        Self::MoveRight,
        Self::Turn,
        Self::TurnRate,
        Self::LookUp,
        Self::LookUpRate,
        Self::ChangePowerValue,
    ];
}

/// The character's input, as of the last input event before the current tick.
///
/// [`HoodInputPlugin`] fills this from keyboard and mouse, but any system running in
/// [`HoodPipelineSystems::Input`] can feed it instead.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct HoodInputState {
    /// Level-triggered: `true` exactly while the power button is held.
    pub active_power_held: bool,
    /// Toggled by each [`HoodAction::ChangePower`] press.
    pub push_mode: bool,
    /// Toggled by each [`HoodAction::Interact`] press.
    pub interact_toggled: bool,
    /// Level-triggered: `true` while the jump button is held.
    pub jump_held: bool,
    crouch_requested: bool,
    move_forward: f32,
    move_right: f32,
    turn: f32,
    turn_rate: f32,
    look_up: f32,
    look_up_rate: f32,
    change_power_value: f32,
}

impl Default for HoodInputState {
    fn default() -> Self {
        Self {
            active_power_held: false,
            push_mode: true,
            interact_toggled: false,
            jump_held: false,
            crouch_requested: false,
            move_forward: 0.0,
            move_right: 0.0,
            turn: 0.0,
            turn_rate: 0.0,
            look_up: 0.0,
            look_up_rate: 0.0,
            change_power_value: 0.0,
        }
    }
}

impl HoodInputState {
    pub fn press(&mut self, action: HoodAction) {
        match action {
            HoodAction::Jump => self.jump_held = true,
            HoodAction::Crouch => self.crouch_requested = true,
            HoodAction::ChangePower => self.push_mode = !self.push_mode,
            HoodAction::ActivePower => self.active_power_held = true,
            HoodAction::Interact => self.interact_toggled = !self.interact_toggled,
        }
    }

    pub fn release(&mut self, action: HoodAction) {
        match action {
            HoodAction::Jump => self.jump_held = false,
            HoodAction::ActivePower => self.active_power_held = false,
            HoodAction::Crouch | HoodAction::ChangePower | HoodAction::Interact => {}
        }
    }

    /// Consume a pending crouch press. Each press is reported once.
    pub fn take_crouch_request(&mut self) -> bool {
        std::mem::take(&mut self.crouch_requested)
    }

    pub fn set_axis(&mut self, axis: HoodAxis, value: f32) {
        *self.axis_mut(axis) = value;
    }

    pub fn axis(&self, axis: HoodAxis) -> f32 {
        match axis {
            HoodAxis::MoveForward => self.move_forward,
            HoodAxis::MoveRight => self.move_right,
            HoodAxis::Turn => self.turn,
            HoodAxis::TurnRate => self.turn_rate,
            HoodAxis::LookUp => self.look_up,
            HoodAxis::LookUpRate => self.look_up_rate,
            HoodAxis::ChangePowerValue => self.change_power_value,
        }
    }

    fn axis_mut(&mut self, axis: HoodAxis) -> &mut f32 {
        match axis {
            HoodAxis::MoveForward => &mut self.move_forward,
            HoodAxis::MoveRight => &mut self.move_right,
            HoodAxis::Turn => &mut self.turn,
            HoodAxis::TurnRate => &mut self.turn_rate,
            HoodAxis::LookUp => &mut self.look_up,
            HoodAxis::LookUpRate => &mut self.look_up_rate,
            HoodAxis::ChangePowerValue => &mut self.change_power_value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoodButton {
    Key(KeyCode),
    Mouse(MouseButton),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoodAxisSource {
    /// Contributes the binding's scale while held.
    Button(HoodButton),
    /// Horizontal mouse motion this frame.
    MouseMotionX,
    /// Vertical mouse motion this frame. Positive is downward.
    MouseMotionY,
    /// Vertical mouse wheel scrolling this frame.
    MouseWheel,
}

/// Maps keyboard and mouse to [`HoodAction`]s and [`HoodAxis`] values.
///
/// An axis bound to several sources gets the sum of their scaled values.
#[derive(Resource, Debug, Clone)]
pub struct HoodInputBindings {
    pub actions: Vec<(HoodAction, HoodButton)>,
    pub axes: Vec<(HoodAxis, HoodAxisSource, f32)>,
}

impl Default for HoodInputBindings {
    fn default() -> Self {
        let key = |key_code: KeyCode| HoodAxisSource::Button(HoodButton::Key(key_code));
        Self::empty()
            .bind_action(HoodAction::Jump, HoodButton::Key(KeyCode::Space))
            .bind_action(HoodAction::Crouch, HoodButton::Key(KeyCode::ControlLeft))
            .bind_action(HoodAction::ChangePower, HoodButton::Key(KeyCode::KeyQ))
            .bind_action(HoodAction::ActivePower, HoodButton::Mouse(MouseButton::Left))
            .bind_action(HoodAction::Interact, HoodButton::Key(KeyCode::KeyE))
            .bind_axis(HoodAxis::MoveForward, key(KeyCode::KeyW), 1.0)
            .bind_axis(HoodAxis::MoveForward, key(KeyCode::KeyS), -1.0)
            .bind_axis(HoodAxis::MoveRight, key(KeyCode::KeyD), 1.0)
            .bind_axis(HoodAxis::MoveRight, key(KeyCode::KeyA), -1.0)
            .bind_axis(HoodAxis::Turn, HoodAxisSource::MouseMotionX, 1.0)
            .bind_axis(HoodAxis::TurnRate, key(KeyCode::ArrowRight), 1.0)
            .bind_axis(HoodAxis::TurnRate, key(KeyCode::ArrowLeft), -1.0)
            .bind_axis(HoodAxis::LookUp, HoodAxisSource::MouseMotionY, -1.0)
            .bind_axis(HoodAxis::LookUpRate, key(KeyCode::ArrowUp), 1.0)
            .bind_axis(HoodAxis::LookUpRate, key(KeyCode::ArrowDown), -1.0)
            .bind_axis(HoodAxis::ChangePowerValue, HoodAxisSource::MouseWheel, 1.0)
    }
}

impl HoodInputBindings {
    pub fn empty() -> Self {
        Self {
            actions: Vec::new(),
            axes: Vec::new(),
        }
    }

    pub fn bind_action(mut self, action: HoodAction, button: HoodButton) -> Self {
        self.actions.push((action, button));
        self
    }

    pub fn bind_axis(mut self, axis: HoodAxis, source: HoodAxisSource, scale: f32) -> Self {
        self.axes.push((axis, source, scale));
        self
    }

    /// Deliver the button edges of this frame to `state`.
    pub fn apply_buttons(
        &self,
        state: &mut HoodInputState,
        just_pressed: impl Fn(HoodButton) -> bool,
        just_released: impl Fn(HoodButton) -> bool,
    ) {
        for (action, button) in self.actions.iter() {
            if just_pressed(*button) {
                state.press(*action);
            }
            if just_released(*button) {
                state.release(*action);
            }
        }
    }

    pub fn axis_value(
        &self,
        axis: HoodAxis,
        pressed: impl Fn(HoodButton) -> bool,
        mouse_motion: Vec2,
        mouse_wheel: f32,
    ) -> f32 {
        self.axes
            .iter()
            .filter(|(bound_axis, ..)| *bound_axis == axis)
            .map(|(_, source, scale)| {
                let raw = match source {
                    HoodAxisSource::Button(button) => {
                        if pressed(*button) {
                            1.0
                        } else {
                            0.0
                        }
                    }
                    HoodAxisSource::MouseMotionX => mouse_motion.x,
                    HoodAxisSource::MouseMotionY => mouse_motion.y,
                    HoodAxisSource::MouseWheel => mouse_wheel,
                };
                raw * scale
            })
            .sum()
    }
}

/// Feeds [`HoodInputState`] from keyboard and mouse according to [`HoodInputBindings`].
///
/// This plugin is optional - games using another input crate can write to [`HoodInputState`]
/// themselves in [`HoodPipelineSystems::Input`]. Mouse events are read once per run of the
/// schedule, so this should run in a schedule that runs every frame.
pub struct HoodInputPlugin {
    schedule: InternedScheduleLabel,
}

impl HoodInputPlugin {
    pub fn new(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
        }
    }
}

impl Default for HoodInputPlugin {
    fn default() -> Self {
        Self::new(Update)
    }
}

impl Plugin for HoodInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoodInputBindings>();
        app.add_systems(
            self.schedule,
            read_device_input_system.in_set(HoodPipelineSystems::Input),
        );
    }
}

fn read_device_input_system(
    bindings: Res<HoodInputBindings>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
    mut query: Query<(&mut HoodInputState, Option<&HoodToggle>)>,
) {
    let motion: Vec2 = mouse_motion.read().map(|event| event.delta).sum();
    let wheel: f32 = mouse_wheel.read().map(|event| event.y).sum();

    let pressed = |button: HoodButton| match button {
        HoodButton::Key(key) => keyboard.pressed(key),
        HoodButton::Mouse(mouse_button) => mouse_buttons.pressed(mouse_button),
    };
    let just_pressed = |button: HoodButton| match button {
        HoodButton::Key(key) => keyboard.just_pressed(key),
        HoodButton::Mouse(mouse_button) => mouse_buttons.just_pressed(mouse_button),
    };
    let just_released = |button: HoodButton| match button {
        HoodButton::Key(key) => keyboard.just_released(key),
        HoodButton::Mouse(mouse_button) => mouse_buttons.just_released(mouse_button),
    };

    for (mut state, toggle) in query.iter_mut() {
        if toggle.copied().unwrap_or_default() == HoodToggle::Disabled {
            continue;
        }
        bindings.apply_buttons(&mut state, just_pressed, just_released);
        for axis in HoodAxis::ALL {
            let value = bindings.axis_value(axis, pressed, motion, wheel);
            state.set_axis(axis, value);
        }
    }
}
