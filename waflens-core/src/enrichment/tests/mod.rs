mod headers_tests;
