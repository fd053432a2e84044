// extensions/spring.rs
//
// Damped spring for values that chase a moving target
// (a bubble's hover/press scale).

use serde::{Deserialize, Serialize};

/// Spring constants. Mass-normalized semi-implicit Euler, stable while
/// `sqrt(stiffness / mass) * dt` stays below 2.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 260.0,
            damping: 22.0,
            mass: 0.6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
    params: SpringParams,
}

impl Spring {
    pub fn new(value: f32, params: SpringParams) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            params,
        }
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Advance one step and return the new value.
    pub fn step(&mut self, dt: f32) -> f32 {
        if dt <= 0.0 {
            return self.value;
        }
        let mass = self.params.mass.max(f32::EPSILON);
        let force = -self.params.stiffness * (self.value - self.target)
            - self.params.damping * self.velocity;
        self.velocity += force / mass * dt;
        self.value += self.velocity * dt;
        self.value
    }
}
