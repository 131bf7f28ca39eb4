//! Fixed demo fixture: five housing-forum posts, always available offline.
//! Loading these replaces the current session's post list like any other
//! collection action.

use crate::collect::Post;

const DEMO_LINK: &str = "https://www.mobile01.com";

pub fn demo_posts() -> Vec<Post> {
    [
        "Is a pre-sale unit in Da'an at over a million per ping reasonable? House hunting is wearing me out",
        "How is the build quality of the XX project? I heard about leak complaints on earlier phases",
        "Sharing: finally signed! Go see this one, the layout really is great",
        "Is now the market peak? Want to buy to live in but afraid of being stuck with the mortgage",
        "Old Xinyi walk-up vs. new unit in a New Taipei redevelopment zone, how to choose?",
    ]
    .into_iter()
    .map(|title| Post {
        title: title.to_string(),
        link: DEMO_LINK.to_string(),
        source: "Demo".to_string(),
    })
    .collect()
}
