use yew::prelude::*;

use crate::config::LandingConfig;
use crate::platform::web::WebPlatform;
use crate::init_landing;

#[derive(Properties, PartialEq, Clone)]
pub struct LandingBehaviorsProps {
    #[prop_or_default]
    pub config: LandingConfig,
}

/// Attaches the landing controllers once the surrounding markup has rendered,
/// and detaches them when the component unmounts or the config changes.
#[function_component(LandingBehaviors)]
pub fn landing_behaviors(props: &LandingBehaviorsProps) -> Html {
    {
        let config = props.config.clone();
        use_effect_with_deps(
            move |config: &LandingConfig| {
                let landing = match WebPlatform::platform() {
                    Ok(platform) => Some(init_landing(&platform, config)),
                    Err(e) => {
                        log::error!("Landing behaviors unavailable: {}", e);
                        None
                    }
                };
                move || {
                    drop(landing);
                }
            },
            config,
        );
    }

    html! {}
}
