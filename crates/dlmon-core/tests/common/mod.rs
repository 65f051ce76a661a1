pub mod steam_tree;
