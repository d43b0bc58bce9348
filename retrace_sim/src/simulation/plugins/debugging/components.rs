use bevy::prelude::Component;

/// A marker component that enables the recorded-path overlay for the body it's
/// attached to.
#[derive(Component)]
pub struct ShowPathGizmos;
