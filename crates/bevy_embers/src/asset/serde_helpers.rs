use bevy::prelude::*;

pub(crate) fn is_true(value: &bool) -> bool {
    *value
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

pub(crate) fn is_zero_f32(value: &f32) -> bool {
    *value == 0.0
}

pub(crate) fn is_zero_vec3(value: &Vec3) -> bool {
    *value == Vec3::ZERO
}

pub(crate) fn is_one_vec2(value: &Vec2) -> bool {
    *value == Vec2::ONE
}

pub(crate) fn is_one_vec4(value: &Vec4) -> bool {
    *value == Vec4::ONE
}
