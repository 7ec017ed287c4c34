mod detail;
mod home;
mod render;

pub use detail::{
    EPISODE_REVALIDATE, EpisodePage, PRERENDERED_EPISODE_LIMIT, build_episode_page,
    prerendered_episode_ids,
};
pub use home::{HOME_EPISODE_LIMIT, HOME_REVALIDATE, HomePage, build_home_page};
pub use render::{Layout, render_episode, render_home};
