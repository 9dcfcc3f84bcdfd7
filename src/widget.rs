use bevy::prelude::*;

type OwnerObserver = Box<dyn Fn(Option<Entity>) + Send + Sync>;

/// A UI widget that knows which actor it belongs to.
///
/// Code that shows per-actor data registers observers, which are told about every new owner.
#[derive(Component, Default)]
pub struct HoodActorWidget {
    owning_actor: Option<Entity>,
    observers: Vec<OwnerObserver>,
}

impl std::fmt::Debug for HoodActorWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoodActorWidget")
            .field("owning_actor", &self.owning_actor)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl HoodActorWidget {
    pub fn owning_actor(&self) -> Option<Entity> {
        self.owning_actor
    }

    pub fn observe_owning_actor(
        &mut self,
        observer: impl Fn(Option<Entity>) + Send + Sync + 'static,
    ) -> &mut Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Change the owning actor and notify the observers.
    ///
    /// Returns `false`, without notifying anyone, if `new_owner` is already the owner.
    pub fn set_owning_actor(&mut self, new_owner: Option<Entity>) -> bool {
        if self.owning_actor == new_owner {
            return false;
        }
        self.owning_actor = new_owner;
        for observer in self.observers.iter() {
            observer(new_owner);
        }
        true
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HoodWidgetSpace {
    #[default]
    Screen,
    World,
}

/// Attaches a widget entity to the actor this component is on.
#[derive(Component, Debug, Clone)]
pub struct HoodWidgetComponent {
    pub text: String,
    /// The entity carrying the [`HoodActorWidget`].
    pub widget: Option<Entity>,
    pub space: HoodWidgetSpace,
    pub draw_at_desired_size: bool,
}

impl Default for HoodWidgetComponent {
    fn default() -> Self {
        Self {
            text: String::new(),
            widget: None,
            space: HoodWidgetSpace::Screen,
            draw_at_desired_size: true,
        }
    }
}

pub(crate) fn assign_widget_owners_system(
    components_query: Query<(Entity, &HoodWidgetComponent), Changed<HoodWidgetComponent>>,
    mut widgets_query: Query<&mut HoodActorWidget>,
) {
    for (actor, component) in components_query.iter() {
        let Some(widget) = component.widget else {
            continue;
        };
        match widgets_query.get_mut(widget) {
            Ok(mut actor_widget) => {
                if actor_widget.set_owning_actor(Some(actor)) {
                    debug!("Widget {widget} is now owned by {actor}");
                }
            }
            Err(_) => {
                warn!("Widget {widget} of {actor} is not an actor widget");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn observers_fire_once_per_owner() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut widget = HoodActorWidget::default();
        widget.observe_owning_actor({
            let calls = calls.clone();
            move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        });

        let actor = Entity::from_raw(7);
        assert!(widget.set_owning_actor(Some(actor)));
        assert!(!widget.set_owning_actor(Some(actor)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(widget.owning_actor(), Some(actor));

        assert!(widget.set_owning_actor(None));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn widget_component_defaults() {
        let component = HoodWidgetComponent::default();
        assert_eq!(component.space, HoodWidgetSpace::Screen);
        assert!(component.draw_at_desired_size);
        assert!(component.widget.is_none());
    }
}
