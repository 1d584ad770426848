//
//  argocd-rs
//  interactive/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Terminal prompts used by `login` and destructive commands.
//!
//! Prompts need a terminal. Commands check [`can_prompt`] first and fail
//! with a hint naming the flag to pass instead.

mod prompt;

pub use prompt::*;
