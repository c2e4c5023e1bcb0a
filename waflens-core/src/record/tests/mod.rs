mod node_tests;
