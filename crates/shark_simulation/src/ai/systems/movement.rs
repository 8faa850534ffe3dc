//! AI movement systems.

use bevy::prelude::*;
use crate::ai::SharkAi;
use crate::components::Kinematics;

/// Система: Kinematics → Transform
///
/// Кинематика: источник истины, Transform только для рендера/внешних
/// систем. Z сохраняем (слой отрисовки), поворот вокруг Z по facing.
pub fn sync_shark_transforms(mut sharks: Query<(&Kinematics, &mut Transform), (With<SharkAi>, Changed<Kinematics>)>) {
    for (kinematics, mut transform) in sharks.iter_mut() {
        transform.translation.x = kinematics.position.x;
        transform.translation.y = kinematics.position.y;
        transform.rotation = Quat::from_rotation_z(kinematics.rotation_angle());
    }
}
